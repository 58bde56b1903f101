//! Client construction for integration and live tests

use grapeddit::{Config, RedditClient};
use std::time::Duration;

/// Client whose auth and data hosts both point at `base_url`
pub fn mock_client(base_url: &str) -> RedditClient {
    mock_client_with(base_url, |_| {})
}

/// Like [`mock_client`], with a hook to adjust the configuration first
pub fn mock_client_with(base_url: &str, adjust: impl FnOnce(&mut Config)) -> RedditClient {
    let mut config = Config::with_base_url(base_url);
    config.request_timeout = Duration::from_secs(5);
    adjust(&mut config);
    RedditClient::new(config).unwrap()
}

/// Configuration for live tests
///
/// Optional environment variables (read from `.env` when present):
/// - `GRAPEDDIT_PUBLIC_BASE_URL` - Auth host (default: https://www.reddit.com)
/// - `GRAPEDDIT_API_BASE_URL` - Data host (default: https://oauth.reddit.com)
/// - `GRAPEDDIT_TIMEOUT_SECS` - Request timeout (default: 30)
pub fn live_config() -> Config {
    dotenvy::dotenv().ok();

    let mut config = Config::default();
    if let Ok(url) = std::env::var("GRAPEDDIT_PUBLIC_BASE_URL") {
        config.public_base_url = url;
    }
    if let Ok(url) = std::env::var("GRAPEDDIT_API_BASE_URL") {
        config.api_base_url = url;
    }
    if let Some(secs) = std::env::var("GRAPEDDIT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.request_timeout = Duration::from_secs(secs);
    }
    config
}

/// Subreddit used by live tests (`GRAPEDDIT_SUBREDDIT`, default: golang)
pub fn live_subreddit() -> String {
    dotenvy::dotenv().ok();
    std::env::var("GRAPEDDIT_SUBREDDIT").unwrap_or_else(|_| "golang".to_string())
}
