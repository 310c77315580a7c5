//! ChatSession struct and history management.

use mindgauge_common::TestType;

use crate::testing::prompts;
use crate::{Message, Role};

/// A conversation session with ordered, append-only turn history.
///
/// The first turn is always exactly one `System` turn; `reset` reinstates
/// it. Not safe for concurrent use: callers go through `&mut self`, so the
/// borrow checker enforces the strictly-sequential contract.
pub struct ChatSession {
    pub(super) messages: Vec<Message>,
    pub(super) system_prompt: String,
}

impl ChatSession {
    /// Session with the default assistant persona.
    pub fn new() -> Self {
        Self::with_system_prompt(prompts::DEFAULT_PERSONA)
    }

    /// Session primed for one guided assessment flavor.
    pub fn for_test(test_type: TestType) -> Self {
        Self::with_system_prompt(prompts::system_prompt(test_type))
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let system_prompt = prompt.into();
        Self {
            messages: vec![Message {
                role: Role::System,
                content: system_prompt.clone(),
            }],
            system_prompt,
        }
    }

    /// Discard all turns and reinstate a fresh system turn.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message {
            role: Role::System,
            content: self.system_prompt.clone(),
        });
    }

    /// Full conversation history, system turn first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of turns in history, including the system turn.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Content of the most recent assistant turn, if any.
    pub fn last_assistant_turn(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
