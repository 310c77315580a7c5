//! Dialogue engine for mindgauge.
//!
//! Provides the GigaChat API client plus the three pieces the rest of the
//! application is built on:
//! - Credential lifecycle management (cached access token, single-flight refresh)
//! - Conversation sessions with replayed turn history
//! - The guided-test orchestrator with conclusion detection

pub mod auth;
pub mod gigachat;
pub mod session;
pub mod testing;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mindgauge_common::TransportError;

pub use auth::{AccessToken, CredentialKey, CredentialStore, TokenManager, TokenTransport};
pub use gigachat::{GigaChatClient, GigaChatConfig};
pub use session::ChatSession;
pub use testing::{StepOutcome, TestPhase, TestRunner};

/// A chat-completion backend: turns an ordered conversation into the
/// next assistant turn.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        access_token: &str,
        messages: &[Message],
    ) -> Result<ChatCompletion, TransportError>;
}

/// One turn of a conversation, replayed verbatim to the model on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Wire-shaped chat-completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Message,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}
