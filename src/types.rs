//! Core types for grapeddit
//!
//! Reddit wraps every entity in a `{"kind": ..., "data": ...}` envelope. Listings
//! nest those envelopes in `data.children`, and comment trees recurse through each
//! comment's `replies`. Comment children are heterogeneous: real comments (`t1`)
//! sit next to `more` placeholders, so [`CommentNode`] dispatches on `kind`.

use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// `kind` of a listing envelope
const LISTING_KIND: &str = "Listing";

/// `kind` of a post
const POST_KIND: &str = "t3";

/// Decode a response body with no limit on JSON nesting
///
/// Comment threads nest several JSON levels per reply, so deep threads exceed
/// serde_json's default recursion limit. The stack grows on the heap as needed
/// instead.
pub fn from_json_slice<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// A `{"kind", "data"}` envelope
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thing<T> {
    /// Type prefix such as `t3` (post) or `t2` (user)
    #[serde(default)]
    pub kind: String,
    /// Entity payload
    pub data: T,
}

/// A paginated listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    /// Always `Listing` for well-formed responses
    #[serde(default)]
    pub kind: String,
    /// Children and pagination cursors
    pub data: ListingData<T>,
}

/// Body of a [`Listing`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingData<T> {
    /// Entries in server order
    #[serde(default = "Vec::new")]
    pub children: Vec<T>,
    /// Cursor for the next page
    #[serde(default)]
    pub after: Option<String>,
    /// Cursor for the previous page
    #[serde(default)]
    pub before: Option<String>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            kind: LISTING_KIND.to_string(),
            data: ListingData {
                children: Vec::new(),
                after: None,
                before: None,
            },
        }
    }
}

impl<T> Listing<T> {
    /// Number of children on this page
    pub fn len(&self) -> usize {
        self.data.children.len()
    }

    /// Returns true if the page holds no children
    pub fn is_empty(&self) -> bool {
        self.data.children.is_empty()
    }
}

/// Listing of posts, as returned by subreddit and search endpoints
pub type PostListing = Listing<Thing<Post>>;

/// Listing of comment tree nodes
pub type CommentListing = Listing<CommentNode>;

impl PostListing {
    /// Posts in listing order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.data.children.iter().map(|thing| &thing.data)
    }
}

impl CommentListing {
    /// Top-level comments, skipping `more` placeholders
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.data.children.iter().filter_map(CommentNode::as_comment)
    }

    /// Top-level `more` placeholders
    pub fn more(&self) -> impl Iterator<Item = &MorePlaceholder> {
        self.data.children.iter().filter_map(|node| match node {
            CommentNode::More(more) => Some(more),
            CommentNode::Comment(_) => None,
        })
    }
}

/// A submission
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Base-36 id without the type prefix
    #[serde(default)]
    pub id: String,
    /// Fullname, e.g. `t3_abc123`
    #[serde(default)]
    pub name: String,
    /// Post title
    #[serde(default)]
    pub title: String,
    /// Account name of the submitter
    #[serde(default)]
    pub author: String,
    /// Subreddit name without the `r/` prefix
    #[serde(default)]
    pub subreddit: String,
    /// Net votes
    #[serde(default)]
    pub score: i64,
    /// Link target (the post's own permalink for self posts)
    #[serde(default)]
    pub url: String,
    /// Markdown body of a self post
    #[serde(default)]
    pub selftext: String,
    /// Comment count reported by the server
    #[serde(default)]
    pub num_comments: i64,
    /// Creation time as fractional Unix seconds
    #[serde(default)]
    pub created_utc: f64,
    /// Site-relative link to the comment page
    #[serde(default)]
    pub permalink: String,
    /// NSFW flag
    #[serde(default)]
    pub over_18: bool,
}

/// Public account information
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Account name
    #[serde(default)]
    pub name: String,
    /// Karma from submissions
    #[serde(default)]
    pub link_karma: i64,
    /// Karma from comments
    #[serde(default)]
    pub comment_karma: i64,
    /// Account creation time as fractional Unix seconds
    #[serde(default)]
    pub created_utc: f64,
}

/// One node of a comment tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum CommentNode {
    /// A loaded comment
    #[serde(rename = "t1")]
    Comment(Comment),
    /// Collapsed siblings that must be fetched separately
    #[serde(rename = "more")]
    More(MorePlaceholder),
}

impl CommentNode {
    /// The comment, if this node is one
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            CommentNode::Comment(comment) => Some(comment),
            CommentNode::More(_) => None,
        }
    }

    /// Number of loaded comments below this node (the node itself excluded)
    pub fn descendant_count(&self) -> usize {
        match self {
            CommentNode::Comment(comment) => comment
                .replies()
                .iter()
                .map(|child| match child {
                    CommentNode::Comment(_) => 1 + child.descendant_count(),
                    CommentNode::More(_) => 0,
                })
                .sum(),
            CommentNode::More(_) => 0,
        }
    }
}

/// A comment (`t1`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Base-36 id without the type prefix
    #[serde(default)]
    pub id: String,
    /// Fullname, e.g. `t1_abc123`
    #[serde(default)]
    pub name: String,
    /// Account name of the commenter
    #[serde(default)]
    pub author: String,
    /// Markdown body
    #[serde(default)]
    pub body: String,
    /// Net votes
    #[serde(default)]
    pub score: i64,
    /// Creation time as fractional Unix seconds
    #[serde(default)]
    pub created_utc: f64,
    /// Fullname of the parent comment or post
    #[serde(default)]
    pub parent_id: String,
    /// Fullname of the post this comment belongs to
    #[serde(default)]
    pub link_id: String,
    /// Nesting depth, 0 for top-level comments
    #[serde(default)]
    pub depth: u32,
    /// Nested replies, if any were loaded
    #[serde(default)]
    pub replies: Replies,
}

impl Comment {
    /// Direct children of this comment
    pub fn replies(&self) -> &[CommentNode] {
        match &self.replies {
            Replies::None => &[],
            Replies::Listing(listing) => &listing.data.children,
        }
    }
}

/// Children of a comment
///
/// Reddit sends `""` for a leaf comment; `null` and `{}` are accepted as well.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Replies {
    /// No replies loaded
    #[default]
    None,
    /// Nested listing of further nodes
    Listing(CommentListing),
}

impl<'de> Deserialize<'de> for Replies {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RepliesVisitor)
    }
}

/// Streams `replies` without buffering the subtree, so each level of a thread is
/// read exactly once
struct RepliesVisitor;

impl<'de> Visitor<'de> for RepliesVisitor {
    type Value = Replies;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an empty string, null, an empty object or a comment listing")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Replies, E> {
        Ok(Replies::None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Replies, E> {
        Ok(Replies::None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Replies, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Replies, E> {
        if value.is_empty() {
            Ok(Replies::None)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    fn visit_map<A>(self, mut map: A) -> Result<Replies, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut kind: Option<String> = None;
        let mut data: Option<ListingData<CommentNode>> = None;
        let mut other_keys = false;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "kind" => kind = Some(map.next_value()?),
                "data" => data = Some(map.next_value()?),
                _ => {
                    other_keys = true;
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        match (kind, data) {
            (kind, Some(data)) => Ok(Replies::Listing(Listing {
                kind: kind.unwrap_or_default(),
                data,
            })),
            (None, None) if !other_keys => Ok(Replies::None),
            _ => Err(de::Error::custom(
                "replies object is neither empty nor a listing",
            )),
        }
    }
}

impl Serialize for Replies {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Replies::None => serializer.serialize_str(""),
            Replies::Listing(listing) => listing.serialize(serializer),
        }
    }
}

/// A `more` placeholder standing in for collapsed comments
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MorePlaceholder {
    /// Number of comments hidden behind this placeholder
    #[serde(default)]
    pub count: u32,
    /// Placeholder id
    #[serde(default)]
    pub id: String,
    /// Fullname of the placeholder
    #[serde(default)]
    pub name: String,
    /// Fullname of the node the hidden comments hang off
    #[serde(default)]
    pub parent_id: String,
    /// Nesting depth
    #[serde(default)]
    pub depth: u32,
    /// Ids to pass to `get_more_comments`, in server order
    #[serde(default)]
    pub children: Vec<String>,
}

/// A post page: the post itself followed by its comment tree
///
/// Decoded from the two-element array the comments endpoint returns. The first
/// element must be a listing holding exactly one `t3` post.
#[derive(Clone, Debug, PartialEq)]
pub struct PostAndComments {
    /// The post
    pub post: Post,
    /// Its comment tree
    pub comments: CommentListing,
}

impl<'de> Deserialize<'de> for PostAndComments {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (posts, comments): (PostListing, CommentListing) =
            Deserialize::deserialize(deserializer)?;

        let mut children = posts.data.children;
        if children.len() != 1 {
            return Err(de::Error::custom(format!(
                "expected exactly one post in the first listing, found {}",
                children.len()
            )));
        }
        let thing = children.remove(0);
        if thing.kind != POST_KIND {
            return Err(de::Error::custom(format!(
                "expected a {POST_KIND} post in the first listing, found kind {:?}",
                thing.kind
            )));
        }

        Ok(Self {
            post: thing.data,
            comments,
        })
    }
}

impl Serialize for PostAndComments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let posts = Listing {
            kind: LISTING_KIND.to_string(),
            data: ListingData {
                children: vec![Thing {
                    kind: POST_KIND.to_string(),
                    data: &self.post,
                }],
                after: None,
                before: None,
            },
        };
        (posts, &self.comments).serialize(serializer)
    }
}

/// Result of a "load more comments" request
///
/// `comments` is flat and in server order; nothing is spliced into an existing tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MoreChildrenEnvelope", into = "MoreChildrenEnvelope")]
pub struct MoreComments {
    /// Errors reported by the API, normally empty
    pub errors: Vec<Value>,
    /// Loaded comments
    pub comments: Vec<Comment>,
    /// Placeholders for comments that are still collapsed
    pub more: Vec<MorePlaceholder>,
}

#[derive(Serialize, Deserialize)]
struct MoreChildrenEnvelope {
    json: MoreChildrenJson,
}

#[derive(Serialize, Deserialize)]
struct MoreChildrenJson {
    #[serde(default)]
    errors: Vec<Value>,
    #[serde(default)]
    data: Option<MoreChildrenData>,
}

#[derive(Serialize, Deserialize)]
struct MoreChildrenData {
    #[serde(default)]
    things: Vec<CommentNode>,
}

impl From<MoreChildrenEnvelope> for MoreComments {
    fn from(envelope: MoreChildrenEnvelope) -> Self {
        let mut result = MoreComments {
            errors: envelope.json.errors,
            ..Default::default()
        };
        for node in envelope.json.data.map(|d| d.things).unwrap_or_default() {
            match node {
                CommentNode::Comment(comment) => result.comments.push(comment),
                CommentNode::More(more) => result.more.push(more),
            }
        }
        result
    }
}

impl From<MoreComments> for MoreChildrenEnvelope {
    fn from(more: MoreComments) -> Self {
        let things = more
            .comments
            .into_iter()
            .map(CommentNode::Comment)
            .chain(more.more.into_iter().map(CommentNode::More))
            .collect();
        MoreChildrenEnvelope {
            json: MoreChildrenJson {
                errors: more.errors,
                data: Some(MoreChildrenData { things }),
            },
        }
    }
}

/// Sort order for a post's comment tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    /// "Best"
    #[default]
    Confidence,
    /// Highest score first
    Top,
    /// Newest first
    New,
    /// Most contested first
    Controversial,
    /// Oldest first
    Old,
    /// Q&A
    Qa,
}

impl CommentSort {
    /// Query parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            CommentSort::Confidence => "confidence",
            CommentSort::Top => "top",
            CommentSort::New => "new",
            CommentSort::Controversial => "controversial",
            CommentSort::Old => "old",
            CommentSort::Qa => "qa",
        }
    }
}

impl fmt::Display for CommentSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_helpers::comment_chain;
    use serde_json::json;

    fn comment_json(id: &str, replies: Value) -> Value {
        json!({
            "kind": "t1",
            "data": {
                "id": id,
                "name": format!("t1_{id}"),
                "author": "commenter",
                "body": format!("body of {id}"),
                "score": 5,
                "created_utc": 1_700_000_000.5,
                "parent_id": "t3_post1",
                "link_id": "t3_post1",
                "replies": replies,
            }
        })
    }

    fn more_json() -> Value {
        json!({
            "kind": "more",
            "data": {
                "count": 2,
                "id": "more123",
                "name": "t1_more123",
                "parent_id": "t3_post1",
                "depth": 0,
                "children": ["c5", "c6"],
            }
        })
    }

    fn listing_json(children: Vec<Value>) -> Value {
        json!({"kind": "Listing", "data": {"children": children, "after": null, "before": null}})
    }

    #[test]
    fn decodes_a_post_listing() {
        let body = json!({
            "kind": "Listing",
            "data": {
                "children": [{
                    "kind": "t3",
                    "data": {
                        "id": "abc123",
                        "name": "t3_abc123",
                        "title": "Test Post",
                        "author": "testuser",
                        "subreddit": "golang",
                        "score": 100,
                        "url": "https://example.com",
                        "selftext": "",
                        "num_comments": 10,
                        "created_utc": 1_699_999_999.0,
                        "over_18": false,
                    }
                }],
                "after": "t3_abc123",
                "before": null,
            }
        });

        let listing: PostListing = serde_json::from_value(body).unwrap();
        assert_eq!(listing.kind, "Listing");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.data.after.as_deref(), Some("t3_abc123"));
        assert_eq!(listing.data.before, None);

        let post = listing.posts().next().unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.score, 100);
        assert_eq!(post.num_comments, 10);
        assert_eq!(post.created_utc, 1_699_999_999.0);
    }

    #[test]
    fn replies_sentinels_decode_to_none() {
        for replies in [json!(""), json!(null), json!({})] {
            let node: CommentNode = serde_json::from_value(comment_json("c1", replies.clone()))
                .unwrap_or_else(|e| panic!("replies {replies} failed: {e}"));
            let comment = node.as_comment().unwrap();
            assert_eq!(comment.replies, Replies::None);
            assert!(comment.replies().is_empty());
        }
    }

    #[test]
    fn missing_replies_field_is_a_leaf() {
        let node: CommentNode =
            serde_json::from_value(json!({"kind": "t1", "data": {"id": "c1"}})).unwrap();
        assert_eq!(node.as_comment().unwrap().replies, Replies::None);
    }

    #[test]
    fn non_empty_replies_string_is_rejected() {
        let result = serde_json::from_value::<CommentNode>(comment_json("c1", json!("oops")));
        assert!(result.is_err());
    }

    #[test]
    fn nested_replies_decode_to_arbitrary_depth() {
        let leaf = comment_json("c3", json!(""));
        let middle = comment_json("c2", listing_json(vec![leaf, more_json()]));
        let root = comment_json("c1", listing_json(vec![middle]));

        let node: CommentNode = serde_json::from_value(root).unwrap();
        let c1 = node.as_comment().unwrap();
        let c2 = c1.replies()[0].as_comment().unwrap();
        assert_eq!(c2.id, "c2");
        assert_eq!(c2.replies().len(), 2);
        assert_eq!(c2.replies()[0].as_comment().unwrap().id, "c3");
        assert!(matches!(c2.replies()[1], CommentNode::More(_)));

        assert_eq!(node.descendant_count(), 2);
    }

    #[test]
    fn comment_listing_separates_comments_and_more() {
        let listing: CommentListing = serde_json::from_value(listing_json(vec![
            comment_json("c1", json!("")),
            comment_json("c2", json!("")),
            more_json(),
        ]))
        .unwrap();

        let ids: Vec<_> = listing.comments().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2"]);

        let more: Vec<_> = listing.more().collect();
        assert_eq!(more.len(), 1);
        assert_eq!(more[0].count, 2);
        assert_eq!(more[0].children, ["c5", "c6"]);
    }

    #[test]
    fn deep_threads_decode_past_the_default_recursion_limit() {
        let body = comment_chain(200);
        assert!(
            serde_json::from_str::<CommentNode>(&body).is_err(),
            "a 200-deep thread should exceed serde_json's default limit"
        );

        let node: CommentNode = from_json_slice(body.as_bytes()).unwrap();
        assert_eq!(node.descendant_count(), 199);

        let mut current = node.as_comment().unwrap();
        let mut levels = 1;
        while let Some(child) = current.replies().first() {
            current = child.as_comment().unwrap();
            levels += 1;
        }
        assert_eq!(levels, 200);
        assert_eq!(current.id, "c199");
        assert_eq!(current.depth, 199);
    }

    #[test]
    fn trailing_garbage_after_a_body_is_rejected() {
        let result = from_json_slice::<CommentNode>(br#"{"kind": "more", "data": {}} extra"#);
        assert!(result.is_err());
    }

    #[test]
    fn replies_object_with_other_fields_is_rejected() {
        let result =
            serde_json::from_value::<CommentNode>(comment_json("c1", json!({"unexpected": 1})));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_comment_kind_is_rejected() {
        let result = serde_json::from_value::<CommentNode>(json!({"kind": "t3", "data": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn post_and_comments_decodes_the_pair() {
        let body = json!([
            {"kind": "Listing", "data": {"children": [
                {"kind": "t3", "data": {"id": "post1", "title": "Post"}}
            ]}},
            listing_json(vec![comment_json("c1", json!(""))]),
        ]);

        let page: PostAndComments = serde_json::from_value(body).unwrap();
        assert_eq!(page.post.id, "post1");
        assert_eq!(page.comments.comments().count(), 1);
    }

    #[test]
    fn post_and_comments_requires_exactly_one_post() {
        let empty = json!([listing_json(vec![]), listing_json(vec![])]);
        let err = serde_json::from_value::<PostAndComments>(empty).unwrap_err();
        assert!(err.to_string().contains("exactly one post"));

        let post = json!({"kind": "t3", "data": {"id": "p"}});
        let two = json!([listing_json(vec![post.clone(), post]), listing_json(vec![])]);
        assert!(serde_json::from_value::<PostAndComments>(two).is_err());
    }

    #[test]
    fn post_and_comments_requires_a_post_kind() {
        let comment_as_post = json!([
            listing_json(vec![comment_json("c1", json!(""))]),
            listing_json(vec![]),
        ]);
        let err = serde_json::from_value::<PostAndComments>(comment_as_post).unwrap_err();
        assert!(err.to_string().contains("t3"));

        let untagged = json!([
            {"kind": "Listing", "data": {"children": [{"data": {"id": "p"}}]}},
            listing_json(vec![]),
        ]);
        assert!(serde_json::from_value::<PostAndComments>(untagged).is_err());
    }

    #[test]
    fn post_and_comments_serializes_to_the_endpoint_shape() {
        let body = json!([
            {"kind": "Listing", "data": {"children": [
                {"kind": "t3", "data": {"id": "post1", "title": "Post"}}
            ]}},
            listing_json(vec![comment_json("c1", json!("")), more_json()]),
        ]);
        let page: PostAndComments = serde_json::from_value(body).unwrap();

        let written = serde_json::to_value(&page).unwrap();
        assert_eq!(written[0]["data"]["children"][0]["kind"], "t3");

        let reread: PostAndComments = serde_json::from_value(written).unwrap();
        assert_eq!(reread, page);
    }

    #[test]
    fn more_comments_serializes_to_the_endpoint_shape() {
        let body = json!({
            "json": {
                "errors": [],
                "data": {"things": [comment_json("c5", json!("")), more_json()]}
            }
        });
        let more: MoreComments = serde_json::from_value(body).unwrap();

        let written = serde_json::to_value(&more).unwrap();
        assert_eq!(written["json"]["data"]["things"][0]["kind"], "t1");
        assert_eq!(written["json"]["data"]["things"][1]["kind"], "more");

        let reread: MoreComments = serde_json::from_value(written).unwrap();
        assert_eq!(reread, more);
    }

    #[test]
    fn more_comments_splits_things_by_kind() {
        let body = json!({
            "json": {
                "errors": [],
                "data": {"things": [
                    comment_json("c5", json!("")),
                    comment_json("c6", json!("")),
                    more_json(),
                ]}
            }
        });

        let more: MoreComments = serde_json::from_value(body).unwrap();
        assert!(more.errors.is_empty());
        let ids: Vec<_> = more.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c5", "c6"]);
        assert_eq!(more.more.len(), 1);
    }

    #[test]
    fn more_comments_keeps_api_errors() {
        let body = json!({"json": {"errors": [["RATELIMIT", "slow down", "ratelimit"]]}});
        let more: MoreComments = serde_json::from_value(body).unwrap();
        assert_eq!(more.errors.len(), 1);
        assert!(more.comments.is_empty());
    }

    #[test]
    fn leaf_replies_serialize_as_empty_string() {
        let comment = Comment {
            id: "c1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["replies"], json!(""));
    }

    #[test]
    fn comment_sort_values() {
        assert_eq!(CommentSort::default().as_str(), "confidence");
        assert_eq!(CommentSort::Qa.to_string(), "qa");
        assert_eq!(
            serde_json::to_value(CommentSort::Controversial).unwrap(),
            json!("controversial")
        );
    }
}
