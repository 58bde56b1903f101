//! Subreddit, user and search endpoints.

use crate::error::Result;
use crate::request::path_segment;
use crate::types::{PostListing, Thing, User};
use tokio_util::sync::CancellationToken;

use super::RedditClient;

impl RedditClient {
    /// Posts of `subreddit` in the given sort
    ///
    /// `sort` is one of Reddit's listing sorts (`hot`, `new`, `top`, `rising`,
    /// `controversial`). Both values are percent-encoded into the path.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::Error::NotAuthenticated) before
    /// `authenticate()`, otherwise any pipeline error.
    pub async fn get_subreddit(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        sort: &str,
    ) -> Result<PostListing> {
        let endpoint = format!(
            "/r/{}/{}.json",
            path_segment(subreddit),
            path_segment(sort)
        );
        let body = self.fetch(cancel, &endpoint, &[]).await?;
        self.decode("subreddit listing", &body)
    }

    /// Public profile of `username`
    pub async fn get_user(&self, cancel: &CancellationToken, username: &str) -> Result<Thing<User>> {
        let endpoint = format!("/user/{}/about.json", path_segment(username));
        let body = self.fetch(cancel, &endpoint, &[]).await?;
        self.decode("user", &body)
    }

    /// Site-wide search
    ///
    /// `sort` is `relevance`, `hot`, `top`, `new` or `comments`; `timeframe` is
    /// `hour`, `day`, `week`, `month`, `year` or `all`.
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        query: &str,
        sort: &str,
        timeframe: &str,
    ) -> Result<PostListing> {
        let params = [("q", query), ("sort", sort), ("t", timeframe)];
        let body = self.fetch(cancel, "/search.json", &params).await?;
        self.decode("search results", &body)
    }
}
