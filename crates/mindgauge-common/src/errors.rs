#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no authorization credential configured")]
    MissingCredential,

    #[error("token refresh failed{}", format_refresh_detail(.status, .body))]
    RefreshFailed {
        status: Option<u16>,
        body: Option<String>,
    },
}

fn format_refresh_detail(status: &Option<u16>, body: &Option<String>) -> String {
    match (status, body) {
        (Some(s), Some(b)) => format!(" (HTTP {s}): {b}"),
        (Some(s), None) => format!(" (HTTP {s})"),
        (None, Some(b)) => format!(": {b}"),
        (None, None) => String::new(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("empty response from server")]
    EmptyResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("no assistant message in response")]
    NoAssistantMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(String),

    #[error("store path error: {0}")]
    Path(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
