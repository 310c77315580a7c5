//! Access-token state derivation.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

/// Safety margin before actual expiry at which a token is treated as
/// needing renewal.
pub(crate) const REFRESH_BUFFER_SECS: i64 = 5 * 60;

/// Lifetime assumed when the provider gives no expiry hint at all.
pub(crate) const DEFAULT_TOKEN_TTL_SECS: i64 = 30 * 60;

/// A short-lived bearer token with its absolute expiry. Value and expiry
/// are only ever replaced together.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Derived token condition, computed on read and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Missing,
    Valid,
    NeedsRefresh,
}

/// Classify a cached token against `now` using the refresh buffer.
pub fn token_state(token: Option<&AccessToken>, now: DateTime<Utc>) -> TokenState {
    match token {
        None => TokenState::Missing,
        Some(t) if now < t.expires_at - TimeDelta::seconds(REFRESH_BUFFER_SECS) => {
            TokenState::Valid
        }
        Some(_) => TokenState::NeedsRefresh,
    }
}

/// Provider response to a token exchange.
#[derive(Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Absolute expiry, unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Relative lifetime, seconds from now.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl TokenGrant {
    /// Absolute expiry for this grant: the provider's absolute stamp wins,
    /// else `now` plus the relative lifetime, else the default TTL.
    pub fn expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if let Some(at) = self.expires_at.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
            return at;
        }
        if let Some(secs) = self.expires_in {
            return now + TimeDelta::seconds(secs);
        }
        now + TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECS)
    }
}
