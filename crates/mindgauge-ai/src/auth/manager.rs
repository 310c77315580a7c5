//! Token manager: cached access token with serialized, single-flight refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error};

use mindgauge_common::AuthError;

use super::state::{token_state, AccessToken, TokenState};
use super::{CredentialKey, CredentialStore, TokenTransport};

/// Owns token validity decisions and serializes refreshes.
///
/// All operations run inside one mutex-guarded critical section scoped to
/// the manager instance; the cached token is the only mutable resource
/// shared across sessions. Holding the lock across the network exchange is
/// what makes the refresh single-flight: N concurrent callers hitting an
/// expiring token produce exactly one transport call.
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    transport: Arc<dyn TokenTransport>,
    cache: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    /// Create a manager, reviving any token the store persisted earlier.
    pub fn new(store: Arc<dyn CredentialStore>, transport: Arc<dyn TokenTransport>) -> Self {
        let cached = load_persisted(store.as_ref());
        if cached.is_some() {
            debug!("revived persisted access token");
        }
        Self {
            store,
            transport,
            cache: Mutex::new(cached),
        }
    }

    /// Replace the stored authorization credential and drop any cached
    /// access token so the next read refreshes. No network call.
    pub async fn set_credential(&self, credential: &str) {
        let mut cache = self.cache.lock().await;
        self.store.set(CredentialKey::Authorization, credential);
        self.store.remove(CredentialKey::AccessToken);
        self.store.remove(CredentialKey::AccessTokenExpiry);
        *cache = None;
        debug!("authorization credential replaced, cached token dropped");
    }

    /// Whether an authorization credential is configured.
    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Return an access token valid for at least the refresh buffer from
    /// now, refreshing first if necessary.
    pub async fn valid_token(&self) -> Result<AccessToken, AuthError> {
        let mut cache = self.cache.lock().await;
        let credential = self.credential().ok_or(AuthError::MissingCredential)?;

        if token_state(cache.as_ref(), Utc::now()) == TokenState::Valid {
            if let Some(token) = cache.as_ref() {
                debug!("using cached access token");
                return Ok(token.clone());
            }
        }

        debug!("access token missing or near expiry, refreshing");
        self.refresh_locked(&mut cache, &credential).await
    }

    /// Unconditionally refresh the access token.
    pub async fn force_refresh(&self) -> Result<(), AuthError> {
        let mut cache = self.cache.lock().await;
        let credential = self.credential().ok_or(AuthError::MissingCredential)?;
        self.refresh_locked(&mut cache, &credential).await?;
        Ok(())
    }

    fn credential(&self) -> Option<String> {
        self.store
            .get(CredentialKey::Authorization)
            .filter(|c| !c.is_empty())
    }

    /// Perform the exchange and replace value + expiry together. Must be
    /// called with the cache lock held. On failure the previous token (if
    /// any) is left untouched.
    async fn refresh_locked(
        &self,
        cache: &mut Option<AccessToken>,
        credential: &str,
    ) -> Result<AccessToken, AuthError> {
        let grant = match self.transport.exchange(credential).await {
            Ok(grant) => grant,
            Err(e) => {
                error!("token refresh failed: {e}");
                return Err(e);
            }
        };

        let token = AccessToken {
            expires_at: grant.expiry(Utc::now()),
            value: grant.access_token,
        };
        self.store.set(CredentialKey::AccessToken, &token.value);
        self.store.set(
            CredentialKey::AccessTokenExpiry,
            &token.expires_at.timestamp_millis().to_string(),
        );
        debug!(expires_at = %token.expires_at, "access token refreshed");

        *cache = Some(token.clone());
        Ok(token)
    }
}

fn load_persisted(store: &dyn CredentialStore) -> Option<AccessToken> {
    let value = store.get(CredentialKey::AccessToken)?;
    let expiry_ms = store
        .get(CredentialKey::AccessTokenExpiry)?
        .parse::<i64>()
        .ok()?;
    let expires_at = DateTime::from_timestamp_millis(expiry_ms)?;
    Some(AccessToken { value, expires_at })
}
