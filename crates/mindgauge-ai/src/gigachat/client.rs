//! GigaChat client struct, request building, and response parsing.

use mindgauge_common::TransportError;

use crate::Message;

use super::config::GigaChatConfig;

pub(crate) const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub(crate) const OAUTH_PATH: &str = "/v2/oauth";

/// GigaChat API client. One instance serves both the chat-completion and
/// the token-exchange endpoint.
pub struct GigaChatClient {
    pub(crate) config: GigaChatConfig,
    pub(crate) http: reqwest::Client,
}

impl GigaChatClient {
    pub fn new(config: GigaChatConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout);
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate validation disabled; test environments only");
            builder = builder.danger_accept_invalid_certs(true);
        }
        Self {
            config,
            http: builder.build().expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn chat_url(&self) -> String {
        format!("{}{}", self.config.api_base, CHAT_COMPLETIONS_PATH)
    }

    pub(crate) fn oauth_url(&self) -> String {
        format!("{}{}", self.config.oauth_base, OAUTH_PATH)
    }

    /// Build the JSON request body for the chat-completions endpoint.
    pub(crate) fn build_chat_body(&self, messages: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        })
    }

    /// Read a response body, mapping an empty body to `EmptyResponse` and a
    /// malformed one to `Network`.
    pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(
        text: &str,
    ) -> Result<T, TransportError> {
        if text.trim().is_empty() {
            return Err(TransportError::EmptyResponse);
        }
        serde_json::from_str(text)
            .map_err(|e| TransportError::Network(format!("invalid response body: {e}")))
    }
}
