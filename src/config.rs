//! Configuration types for grapeddit

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// OAuth client id of the official Android application
pub const ANDROID_CLIENT_ID: &str = "ohXpoqrZYub1kg";

/// Host that serves the credential exchange
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://www.reddit.com";

/// Host that serves authenticated data calls
pub const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Android app user agents used when no list is configured
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Reddit/2023.46.0/Android 12",
    "Reddit/2023.45.0/Android 11",
    "Reddit/2023.44.0/Android 13",
    "Reddit/2023.43.0/Android 12",
    "Reddit/2023.42.0/Android 11",
];

/// Rate budget policy
///
/// The budget is the client's estimate of calls left before throttling. Each
/// response carrying `x-ratelimit-remaining` costs one unit; once the budget drops
/// below `refresh_threshold` it is reset to `full`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBudgetConfig {
    /// Assumed full budget at startup and after a reset (default: 100)
    #[serde(default = "default_full_budget")]
    pub full: u32,

    /// Budget level below which the counter is reset (default: 10)
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold: u32,
}

impl Default for RateBudgetConfig {
    fn default() -> Self {
        Self {
            full: default_full_budget(),
            refresh_threshold: default_refresh_threshold(),
        }
    }
}

/// Main configuration for [`RedditClient`](crate::RedditClient)
///
/// Every field has a default, so `Config::default()` talks to the real Reddit hosts
/// with the bundled Android user agents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL for the OAuth exchange (default: "https://www.reddit.com")
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Base URL for data calls (default: "https://oauth.reddit.com")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// OAuth client id sent in the Basic auth header
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// User agents to impersonate; one is picked per client instance
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Deadline applied to every transport send (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Rate budget policy
    #[serde(default)]
    pub rate_budget: RateBudgetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            api_base_url: default_api_base_url(),
            client_id: default_client_id(),
            user_agents: default_user_agents(),
            request_timeout: default_request_timeout(),
            rate_budget: RateBudgetConfig::default(),
        }
    }
}

impl Config {
    /// Point both hosts at the same base URL
    ///
    /// Useful for mock servers and proxies that serve the auth and data paths together.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            public_base_url: base_url.clone(),
            api_base_url: base_url,
            ..Default::default()
        }
    }

    /// Check that the configuration can drive a client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        parse_base_url("public_base_url", &self.public_base_url)?;
        parse_base_url("api_base_url", &self.api_base_url)?;

        if self.client_id.trim().is_empty() {
            return Err(Error::config("client_id", "client id must not be empty"));
        }
        if self.user_agents.is_empty() {
            return Err(Error::config(
                "user_agents",
                "at least one user agent is required",
            ));
        }
        if self.user_agents.iter().any(|ua| ua.trim().is_empty()) {
            return Err(Error::config(
                "user_agents",
                "user agents must not be blank",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::config(
                "request_timeout",
                "request timeout must be greater than zero",
            ));
        }
        if self.rate_budget.refresh_threshold >= self.rate_budget.full {
            return Err(Error::config(
                "rate_budget",
                format!(
                    "refresh_threshold ({}) must be below full ({})",
                    self.rate_budget.refresh_threshold, self.rate_budget.full
                ),
            ));
        }
        Ok(())
    }
}

/// Parse a base URL, rejecting anything that cannot carry an absolute path
pub(crate) fn parse_base_url(key: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| Error::config(key, format!("invalid URL {value:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::config(key, format!("{value:?} cannot be a base URL")));
    }
    Ok(url)
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.into()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

fn default_client_id() -> String {
    ANDROID_CLIENT_ID.into()
}

fn default_user_agents() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_full_budget() -> u32 {
    100
}

fn default_refresh_threshold() -> u32 {
    10
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
