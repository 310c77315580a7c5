//! Shared in-memory fakes for exercising the trait seams in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use mindgauge_common::{AuthError, StoreError, TestResult, TransportError};

use crate::auth::{CredentialKey, CredentialStore, TokenGrant, TokenTransport};
use crate::testing::ResultSink;
use crate::{ChatClient, ChatCompletion, Choice, Message, Role};

#[derive(Default)]
pub(crate) struct MemoryStore {
    values: std::sync::Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub(crate) fn with_credential(credential: &str) -> Arc<Self> {
        let store = Arc::new(Self::default());
        store.set(CredentialKey::Authorization, credential);
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: CredentialKey) -> Option<String> {
        self.values.lock().unwrap().get(key.as_str()).cloned()
    }

    fn set(&self, key: CredentialKey, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.as_str(), value.to_string());
    }

    fn remove(&self, key: CredentialKey) {
        self.values.lock().unwrap().remove(key.as_str());
    }
}

/// Token transport counting exchanges. Each call takes a little wall time
/// so concurrent callers genuinely overlap the critical section.
pub(crate) struct CountingTransport {
    calls: AtomicU32,
    fail: bool,
}

impl CountingTransport {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail: true,
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenTransport for CountingTransport {
    async fn exchange(&self, _credential: &str) -> Result<TokenGrant, AuthError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail {
            return Err(AuthError::RefreshFailed {
                status: Some(500),
                body: Some("boom".into()),
            });
        }
        Ok(TokenGrant {
            access_token: format!("tok-{n}"),
            expires_at: None,
            expires_in: Some(1800),
        })
    }
}

/// Chat backend replaying a fixed script of replies and failures. Panics on
/// calls past the end of the script, so tests double as call-count checks.
pub(crate) struct ScriptedChat {
    replies: std::sync::Mutex<Vec<Result<Vec<Choice>, TransportError>>>,
}

impl ScriptedChat {
    pub(crate) fn new() -> Self {
        Self {
            replies: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(texts: &[&str]) -> Self {
        let chat = Self::new();
        for text in texts {
            chat.push_reply(text);
        }
        chat
    }

    pub(crate) fn push_reply(&self, text: &str) {
        self.replies.lock().unwrap().push(Ok(vec![Choice {
            message: Message {
                role: Role::Assistant,
                content: text.to_string(),
            },
            index: 0,
            finish_reason: Some("stop".into()),
        }]));
    }

    pub(crate) fn push_empty_choices(&self) {
        self.replies.lock().unwrap().push(Ok(vec![]));
    }

    pub(crate) fn push_failure(&self, err: TransportError) {
        self.replies.lock().unwrap().push(Err(err));
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn complete(
        &self,
        _access_token: &str,
        _messages: &[Message],
    ) -> Result<ChatCompletion, TransportError> {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            panic!("unscripted chat call");
        }
        match replies.remove(0) {
            Ok(choices) => Ok(ChatCompletion {
                choices,
                created: None,
                model: None,
                usage: None,
            }),
            Err(err) => Err(err),
        }
    }
}

/// Result sink collecting saved results in memory.
#[derive(Default)]
pub(crate) struct MemorySink {
    results: std::sync::Mutex<Vec<TestResult>>,
}

impl MemorySink {
    pub(crate) fn results(&self) -> Vec<TestResult> {
        self.results.lock().unwrap().clone()
    }
}

impl ResultSink for MemorySink {
    fn save(&self, result: &TestResult) -> Result<u64, StoreError> {
        let mut results = self.results.lock().unwrap();
        results.push(result.clone());
        Ok(results.len() as u64)
    }
}
