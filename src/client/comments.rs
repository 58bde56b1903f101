//! Post pages and comment trees.

use crate::error::Result;
use crate::request::path_segment;
use crate::types::{CommentSort, MoreComments, PostAndComments};
use tokio_util::sync::CancellationToken;

use super::RedditClient;

impl RedditClient {
    /// A post and its comment tree in the server's default sort
    pub async fn get_post(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        post_id: &str,
    ) -> Result<PostAndComments> {
        self.get_comments(cancel, subreddit, post_id, None).await
    }

    /// A post and its comment tree, sorted by `sort` when given
    ///
    /// # Errors
    ///
    /// Decoding fails unless the first listing holds exactly one post.
    pub async fn get_comments(
        &self,
        cancel: &CancellationToken,
        subreddit: &str,
        post_id: &str,
        sort: Option<CommentSort>,
    ) -> Result<PostAndComments> {
        let endpoint = format!(
            "/r/{}/comments/{}.json",
            path_segment(subreddit),
            path_segment(post_id)
        );
        let params: Vec<(&str, &str)> = sort.map(|s| ("sort", s.as_str())).into_iter().collect();

        let body = self.fetch(cancel, &endpoint, &params).await?;
        self.decode("post and comments", &body)
    }

    /// Load the comments hidden behind a `more` placeholder
    ///
    /// `link_id` is the post fullname (`t3_...`) and `children` the placeholder's
    /// ids, sent in order as repeated `children` parameters. The result is a flat
    /// list; it is not merged into any previously fetched tree.
    pub async fn get_more_comments(
        &self,
        cancel: &CancellationToken,
        link_id: &str,
        children: &[String],
    ) -> Result<MoreComments> {
        let mut params = Vec::with_capacity(children.len() + 2);
        params.push(("api_type", "json"));
        params.push(("link_id", link_id));
        params.extend(children.iter().map(|id| ("children", id.as_str())));

        let body = self.fetch(cancel, "/api/morechildren.json", &params).await?;
        self.decode("more comments", &body)
    }
}
