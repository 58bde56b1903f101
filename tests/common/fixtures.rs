//! Canned Reddit responses and wiremock mounts

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::{Value, json};
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the token exchange
pub const AUTH_PATH: &str = "/auth/v2/oauth/access-token/loid";

/// Authorization header for the Android client id
pub const ANDROID_BASIC_AUTH: &str = "Basic b2hYcG9xclpZdWIxa2c6";

/// Gzip-compress `data`
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Token exchange success body
pub fn token_body() -> Value {
    json!({
        "access_token": "test-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "scope": ["*", "email", "pii"]
    })
}

/// Mount a successful token exchange on `server`
pub async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-reddit-loid", "test-loid")
                .insert_header("x-reddit-session", "test-session")
                .set_body_json(token_body()),
        )
        .mount(server)
        .await;
}

/// Listing with one post per title
pub fn post_listing(titles: &[&str]) -> Value {
    let children: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "kind": "t3",
                "data": {
                    "id": format!("post{i}"),
                    "name": format!("t3_post{i}"),
                    "title": title,
                    "author": "testuser",
                    "subreddit": "golang",
                    "score": 100 + i,
                    "url": "https://example.com",
                    "selftext": "",
                    "num_comments": 10,
                    "created_utc": 1_700_000_000.0
                }
            })
        })
        .collect();

    json!({"kind": "Listing", "data": {"children": children, "after": null, "before": null}})
}

/// JSON response compressed with gzip, as the data host sends it
pub fn gzip_json(status: u16, body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-encoding", "gzip")
        .insert_header("content-type", "application/json; charset=UTF-8")
        .set_body_bytes(gzip(body.to_string().as_bytes()))
}

/// Post page with a two-level comment tree and a `more` placeholder
pub fn post_page() -> Value {
    json!([
        {
            "kind": "Listing",
            "data": {"children": [{
                "kind": "t3",
                "data": {"id": "abc123", "name": "t3_abc123", "title": "Test Post", "num_comments": 4}
            }]}
        },
        {
            "kind": "Listing",
            "data": {"children": [
                {
                    "kind": "t1",
                    "data": {
                        "id": "comment1",
                        "author": "commenter1",
                        "body": "Top-level comment",
                        "score": 5,
                        "parent_id": "t3_abc123",
                        "link_id": "t3_abc123",
                        "depth": 0,
                        "replies": {
                            "kind": "Listing",
                            "data": {"children": [{
                                "kind": "t1",
                                "data": {
                                    "id": "reply1",
                                    "body": "Nested reply",
                                    "parent_id": "t1_comment1",
                                    "depth": 1,
                                    "replies": ""
                                }
                            }]}
                        }
                    }
                },
                {
                    "kind": "t1",
                    "data": {"id": "comment2", "body": "Leaf", "parent_id": "t3_abc123", "replies": ""}
                },
                {
                    "kind": "more",
                    "data": {"count": 2, "id": "more1", "parent_id": "t3_abc123", "children": ["c5", "c6"]}
                }
            ]}
        }
    ])
}
