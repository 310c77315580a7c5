//! GigaChat API client configuration.

use std::time::Duration;

/// GigaChat API client configuration.
#[derive(Debug, Clone)]
pub struct GigaChatConfig {
    /// Base URL for chat completions.
    pub api_base: String,
    /// Base URL for the OAuth token-exchange endpoint (separate host).
    pub oauth_base: String,
    pub model: String,
    /// OAuth scope identifying the API product.
    pub scope: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Disable TLS certificate validation. Only for isolated test
    /// environments against self-signed rigs; must stay `false` anywhere
    /// real credentials are in play.
    pub accept_invalid_certs: bool,
}

impl Default for GigaChatConfig {
    fn default() -> Self {
        Self {
            api_base: "https://gigachat.devices.sberbank.ru/api".to_string(),
            oauth_base: "https://ngw.devices.sberbank.ru:9443/api".to_string(),
            model: "GigaChat".to_string(),
            scope: "GIGACHAT_API_PERS".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl GigaChatConfig {
    /// Create config from environment overrides on top of the defaults.
    ///
    /// Recognized variables:
    /// - `GIGACHAT_API_BASE`, `GIGACHAT_OAUTH_BASE`
    /// - `GIGACHAT_MODEL`, `GIGACHAT_SCOPE`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("GIGACHAT_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = std::env::var("GIGACHAT_OAUTH_BASE") {
            config.oauth_base = base;
        }
        if let Ok(model) = std::env::var("GIGACHAT_MODEL") {
            config.model = model;
        }
        if let Ok(scope) = std::env::var("GIGACHAT_SCOPE") {
            config.scope = scope;
        }
        config
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn with_oauth_base(mut self, base: impl Into<String>) -> Self {
        self.oauth_base = base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production_hosts() {
        let config = GigaChatConfig::default();
        assert!(config.api_base.starts_with("https://gigachat"));
        assert!(config.oauth_base.starts_with("https://ngw"));
        assert_eq!(config.model, "GigaChat");
        assert_eq!(config.scope, "GIGACHAT_API_PERS");
    }

    #[test]
    fn certificate_validation_is_on_by_default() {
        assert!(!GigaChatConfig::default().accept_invalid_certs);
    }

    #[test]
    fn builder_overrides() {
        let config = GigaChatConfig::default()
            .with_api_base("http://localhost:9000")
            .with_model("GigaChat-Pro")
            .with_timeouts(Duration::from_secs(5), Duration::from_secs(10));
        assert_eq!(config.api_base, "http://localhost:9000");
        assert_eq!(config.model, "GigaChat-Pro");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
