//! Reddit client split into focused submodules.
//!
//! The `RedditClient` struct and its methods are organized by domain:
//! - [`auth`] - One-shot credential acquisition
//! - [`pipeline`] - Shared send/decompress/status/restriction path for data calls
//! - [`restriction`] - Restriction detection and the consent-cookie retry
//! - [`listings`] - Subreddit, user and search endpoints
//! - [`comments`] - Post pages, comment trees and "load more comments"

mod auth;
mod comments;
mod listings;
mod pipeline;
mod restriction;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use restriction::consent_cookie;

use crate::config::Config;
use crate::entropy::{Entropy, ThreadRngEntropy};
use crate::error::Result;
use crate::gzip::GzipDecoder;
use crate::request::RequestBuilder;
use crate::session::SessionState;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CommentSort, MoreComments, PostAndComments, PostListing, Thing, User};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Public operations of the client
///
/// Implemented by [`RedditClient`]; consumers can implement it on a fake to test code
/// that depends on Reddit data without a network.
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Acquire credentials; must succeed before any other call
    async fn authenticate(&self, cancel: &CancellationToken) -> Result<()>;

    /// Posts of a subreddit in the given sort (`hot`, `new`, `top`, ...)
    async fn get_subreddit(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        sort: &str,
    ) -> Result<PostListing>;

    /// A post and its comment tree in the default sort
    async fn get_post(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        post_id: &str,
    ) -> Result<PostAndComments>;

    /// A post and its comment tree, optionally sorted
    async fn get_comments(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        post_id: &str,
        sort: Option<CommentSort>,
    ) -> Result<PostAndComments>;

    /// Public profile of an account
    async fn get_user(&self, cancel: &CancellationToken, username: &str) -> Result<Thing<User>>;

    /// Site-wide post search
    async fn search(
        &self,
        cancel: &CancellationToken,
        query: &str,
        sort: &str,
        timeframe: &str,
    ) -> Result<PostListing>;

    /// Expand collapsed comments behind a `more` placeholder
    async fn get_more_comments(
        &self,
        cancel: &CancellationToken,
        link_id: &str,
        children: &[String],
    ) -> Result<MoreComments>;
}

/// Reddit client impersonating the official Android app (cloneable - all fields are
/// Arc-wrapped)
///
/// One instance holds one session: a device id and user agent chosen at construction,
/// credentials from [`authenticate`](RedditClient::authenticate), and the rate budget.
/// Clones share that session. All methods take `&self` and may run concurrently.
#[derive(Clone)]
pub struct RedditClient {
    pub(crate) config: Arc<Config>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) session: Arc<SessionState>,
    pub(crate) requests: RequestBuilder,
    pub(crate) gzip: Arc<GzipDecoder>,
}

impl std::fmt::Debug for RedditClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditClient")
            .field("user_agent", &self.session.user_agent())
            .field("authenticated", &self.session.is_authenticated())
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl RedditClient {
    /// Create a client using reqwest and thread-local randomness
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use grapeddit::{Config, RedditClient};
    /// use tokio_util::sync::CancellationToken;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RedditClient::new(Config::default())?;
    ///     let cancel = CancellationToken::new();
    ///
    ///     client.authenticate(&cancel).await?;
    ///     let listing = client.get_subreddit(&cancel, "rust", "hot").await?;
    ///     for post in listing.posts() {
    ///         println!("{} ({})", post.title, post.score);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration does not
    /// validate, or a transport error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Self::with_parts(config, Arc::new(transport), Arc::new(ThreadRngEntropy))
    }

    /// Create a client from an explicit transport and entropy source
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration does not
    /// validate.
    pub fn with_parts(
        config: Config,
        transport: Arc<dyn Transport>,
        entropy: Arc<dyn Entropy>,
    ) -> Result<Self> {
        config.validate()?;

        let session = SessionState::new(
            &config.user_agents,
            config.rate_budget.clone(),
            entropy.as_ref(),
        );
        let requests = RequestBuilder::new(&config.public_base_url, &config.api_base_url, entropy)?;

        tracing::debug!(
            user_agent = session.user_agent(),
            api_base_url = %config.api_base_url,
            "Reddit client created"
        );

        Ok(Self {
            config: Arc::new(config),
            transport,
            session: Arc::new(session),
            requests,
            gzip: Arc::new(GzipDecoder::new()),
        })
    }

    /// Session state shared by this client and its clones
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get the current configuration
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Number of gzip inflaters allocated so far (at most one per client)
    pub fn decompressors_created(&self) -> usize {
        self.gzip.instances_created()
    }
}

#[async_trait]
impl RedditApi for RedditClient {
    async fn authenticate(&self, cancel: &CancellationToken) -> Result<()> {
        RedditClient::authenticate(self, cancel).await
    }

    async fn get_subreddit(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        sort: &str,
    ) -> Result<PostListing> {
        RedditClient::get_subreddit(self, cancel, subreddit, sort).await
    }

    async fn get_post(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        post_id: &str,
    ) -> Result<PostAndComments> {
        RedditClient::get_post(self, cancel, subreddit, post_id).await
    }

    async fn get_comments(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        post_id: &str,
        sort: Option<CommentSort>,
    ) -> Result<PostAndComments> {
        RedditClient::get_comments(self, cancel, subreddit, post_id, sort).await
    }

    async fn get_user(&self, cancel: &CancellationToken, username: &str) -> Result<Thing<User>> {
        RedditClient::get_user(self, cancel, username).await
    }

    async fn search(
        &self,
        cancel: &CancellationToken,
        query: &str,
        sort: &str,
        timeframe: &str,
    ) -> Result<PostListing> {
        RedditClient::search(self, cancel, query, sort, timeframe).await
    }

    async fn get_more_comments(
        &self,
        cancel: &CancellationToken,
        link_id: &str,
        children: &[String],
    ) -> Result<MoreComments> {
        RedditClient::get_more_comments(self, cancel, link_id, children).await
    }
}
