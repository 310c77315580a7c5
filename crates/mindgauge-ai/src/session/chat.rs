//! Async send for ChatSession.

use tracing::debug;

use mindgauge_common::{AssistantError, OrchestrationError};

use crate::auth::TokenManager;
use crate::{ChatClient, Message, Role};

use super::manager::ChatSession;

impl ChatSession {
    /// Append a user turn, obtain a valid token, replay the full history to
    /// the chat transport, and append the assistant's reply.
    ///
    /// On any failure (auth or transport) the user turn already appended is
    /// NOT rolled back: the session records the attempted question, and a
    /// retry appends a new turn alongside the orphaned one.
    pub async fn send(
        &mut self,
        auth: &TokenManager,
        client: &dyn ChatClient,
        user_text: impl Into<String>,
    ) -> Result<String, AssistantError> {
        self.messages.push(Message {
            role: Role::User,
            content: user_text.into(),
        });

        let token = auth.valid_token().await?;

        debug!(turns = self.messages.len(), "sending conversation");
        let completion = client.complete(&token.value, &self.messages).await?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(OrchestrationError::NoAssistantMessage)?;

        self.messages.push(Message {
            role: Role::Assistant,
            content: reply.clone(),
        });
        Ok(reply)
    }
}
