//! Session state shared by every call on one client
//!
//! Credentials and the rate budget live behind a single `RwLock`: requests read a
//! consistent snapshot, authentication and rate signals take the write side. The
//! device id and user agent are fixed for the lifetime of the client and need no
//! locking.

use crate::config::RateBudgetConfig;
use crate::entropy::Entropy;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::sync::{PoisonError, RwLock};

/// Upper bound applied to `expires_in` (one year)
const MAX_TOKEN_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;

/// Body returned by the OAuth token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    /// Bearer token for data calls
    #[serde(default)]
    pub access_token: String,
    /// Token type, normally "bearer"
    #[serde(default)]
    pub token_type: String,
    /// Lifetime of the token in seconds
    #[serde(default)]
    pub expires_in: i64,
    /// Granted scopes
    #[serde(default)]
    pub scope: Vec<String>,
}

/// Credentials captured by one successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Bearer token (never empty once stored)
    pub access_token: String,
    /// Token type reported by the server
    pub token_type: String,
    /// Granted scopes
    pub scope: Vec<String>,
    /// Value of the `x-reddit-loid` response header
    pub loid: String,
    /// Value of the `x-reddit-session` response header
    pub session_id: String,
    /// When the token stops being accepted, as reported by `expires_in`
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    /// Combine the token response with the session headers that came with it
    pub fn from_token_response(
        token: AccessTokenResponse,
        loid: String,
        session_id: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let lifetime = token.expires_in.clamp(0, MAX_TOKEN_LIFETIME_SECS);
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            scope: token.scope,
            loid,
            session_id,
            expires_at: issued_at + ChronoDuration::seconds(lifetime),
        }
    }

    /// Returns true once `expires_at` has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[derive(Debug)]
struct SessionInner {
    credentials: Option<Credentials>,
    rate_budget: u32,
}

/// Mutable per-client session state
#[derive(Debug)]
pub struct SessionState {
    device_id: String,
    user_agent: String,
    budget: RateBudgetConfig,
    inner: RwLock<SessionInner>,
}

impl SessionState {
    /// Create an unauthenticated session
    ///
    /// The device id is generated once and the user agent is drawn once from
    /// `user_agents`, which must be non-empty (guaranteed by `Config::validate`).
    pub fn new(user_agents: &[String], budget: RateBudgetConfig, entropy: &dyn Entropy) -> Self {
        let user_agent = match user_agents.len() {
            0 => String::new(),
            len => user_agents[entropy.choose_index(len)].clone(),
        };

        Self {
            device_id: entropy.device_id(),
            user_agent,
            inner: RwLock::new(SessionInner {
                credentials: None,
                rate_budget: budget.full,
            }),
            budget,
        }
    }

    /// Device identifier sent during authentication
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// User agent impersonated by every request of this client
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns true if a non-empty access token is held
    pub fn is_authenticated(&self) -> bool {
        self.read()
            .credentials
            .as_ref()
            .is_some_and(|c| !c.access_token.is_empty())
    }

    /// Snapshot of the current credentials
    ///
    /// Returns `None` until a successful authentication stores a non-empty token.
    pub fn credentials(&self) -> Option<Credentials> {
        self.read()
            .credentials
            .clone()
            .filter(|c| !c.access_token.is_empty())
    }

    /// Replace the stored credentials in one step
    pub fn set_credentials(&self, credentials: Credentials) {
        self.write().credentials = Some(credentials);
    }

    /// Current rate budget estimate
    pub fn rate_budget(&self) -> u32 {
        self.read().rate_budget
    }

    /// Account for one response that carried `x-ratelimit-remaining`
    ///
    /// The header value is only logged; the budget is decremented by one and reset
    /// to the full value when it drops below the refresh threshold.
    pub fn record_rate_signal(&self, remaining: &str) {
        let mut inner = self.write();
        inner.rate_budget = inner.rate_budget.saturating_sub(1);

        if inner.rate_budget < self.budget.refresh_threshold {
            tracing::debug!(
                budget = inner.rate_budget,
                threshold = self.budget.refresh_threshold,
                server_remaining = remaining,
                "Rate budget below threshold, resetting"
            );
            inner.rate_budget = self.budget.full;
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
