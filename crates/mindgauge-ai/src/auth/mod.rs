//! Credential lifecycle management.
//!
//! A long-lived authorization credential is exchanged for short-lived access
//! tokens via the `TokenTransport` seam. `TokenManager` owns the validity
//! decision and serializes refreshes so concurrent callers trigger at most
//! one exchange.

mod manager;
mod state;

use async_trait::async_trait;

use mindgauge_common::AuthError;

pub use manager::TokenManager;
pub use state::{token_state, AccessToken, TokenGrant, TokenState};

/// Typed keys for the durable credential key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    /// Long-lived authorization credential (base64 client id:secret).
    Authorization,
    /// Cached short-lived access token.
    AccessToken,
    /// Absolute access-token expiry, unix milliseconds.
    AccessTokenExpiry,
}

impl CredentialKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::Authorization => "authorization_token",
            CredentialKey::AccessToken => "access_token",
            CredentialKey::AccessTokenExpiry => "access_token_expiry",
        }
    }
}

/// Durable key-value storage for credentials. Implementations are plain I/O
/// wrappers; persistence failures are logged by the implementation rather
/// than surfaced, so a broken disk degrades to in-memory operation.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Option<String>;
    fn set(&self, key: CredentialKey, value: &str);
    fn remove(&self, key: CredentialKey);
}

/// The network exchange turning an authorization credential into a fresh
/// access token plus an expiry hint.
#[async_trait]
pub trait TokenTransport: Send + Sync {
    async fn exchange(&self, credential: &str) -> Result<TokenGrant, AuthError>;
}
