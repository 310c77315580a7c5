//! `ChatClient` and `TokenTransport` trait implementations for GigaChatClient.

use async_trait::async_trait;
use tracing::{debug, error};
use uuid::Uuid;

use mindgauge_common::{AuthError, TransportError};

use crate::auth::{TokenGrant, TokenTransport};
use crate::{ChatClient, ChatCompletion, Message};

use super::client::GigaChatClient;

#[async_trait]
impl ChatClient for GigaChatClient {
    async fn complete(
        &self,
        access_token: &str,
        messages: &[Message],
    ) -> Result<ChatCompletion, TransportError> {
        let body = self.build_chat_body(messages);

        debug!(model = %self.config.model, turns = messages.len(), "GigaChat chat request");

        let response = self
            .http
            .post(self.chat_url())
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(500).collect::<String>();
            error!(status = status.as_u16(), "GigaChat chat request failed");
            return Err(TransportError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::decode_body(&text)
    }
}

#[async_trait]
impl TokenTransport for GigaChatClient {
    async fn exchange(&self, credential: &str) -> Result<TokenGrant, AuthError> {
        let rq_uid = Uuid::new_v4().to_string();

        debug!(rq_uid = %rq_uid, "GigaChat token exchange");

        let response = self
            .http
            .post(self.oauth_url())
            .header("Authorization", format!("Bearer {credential}"))
            .header("RqUID", rq_uid)
            .form(&[("scope", self.config.scope.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed {
                status: None,
                body: Some(e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(500).collect::<String>();
            error!(status = status.as_u16(), "GigaChat token exchange failed");
            return Err(AuthError::RefreshFailed {
                status: Some(status.as_u16()),
                body: Some(text),
            });
        }

        response.json::<TokenGrant>().await.map_err(|e| {
            AuthError::RefreshFailed {
                status: None,
                body: Some(format!("invalid token response: {e}")),
            }
        })
    }
}
