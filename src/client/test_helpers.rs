//! Shared test helpers for driving a RedditClient without a network.

use crate::client::RedditClient;
use crate::config::Config;
use crate::entropy::SeededEntropy;
use crate::error::TransportError;
use crate::request::ApiRequest;
use crate::session::{AccessTokenResponse, Credentials};
use crate::transport::{ApiResponse, Transport};
use async_trait::async_trait;
use chrono::Utc;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// What the recording transport does with one request
pub(crate) enum Reply {
    /// Answer with this response
    Respond(ApiResponse),
    /// Fail at the transport level
    Fail(TransportError),
    /// Never answer; only cancellation or the deadline ends the call
    Hang,
}

type Responder = dyn Fn(&ApiRequest) -> Reply + Send + Sync;

/// Transport that records every request and answers from a script or closure
pub(crate) struct RecordingTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    /// Answer each request by calling `responder`
    pub(crate) fn new(responder: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer requests with `replies` in order; extra requests fail
    pub(crate) fn scripted(replies: Vec<Reply>) -> Self {
        let queue = Mutex::new(VecDeque::from(replies));
        Self::new(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Reply::Fail(TransportError::Connection("no scripted reply left".into())))
        })
    }

    /// Requests received so far, in order
    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far
    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);

        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(error) => Err(error),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// Gzip-compress `data`
pub(crate) fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Plain JSON response
pub(crate) fn json_response(status: u16, body: &str) -> Reply {
    Reply::Respond(ApiResponse::new(status, body.as_bytes().to_vec()))
}

/// Gzip-encoded JSON response
pub(crate) fn gzip_response(status: u16, body: &str) -> Reply {
    Reply::Respond(
        ApiResponse::new(status, gzip(body.as_bytes())).with_header("Content-Encoding", "gzip"),
    )
}

/// Successful token exchange response
pub(crate) fn token_reply() -> Reply {
    Reply::Respond(
        ApiResponse::new(
            200,
            br#"{"access_token":"test-token","token_type":"bearer","expires_in":3600,"scope":["*","email","pii"]}"#
                .to_vec(),
        )
        .with_header("x-reddit-loid", "test-loid")
        .with_header("x-reddit-session", "test-session"),
    )
}

/// Minimal post listing body
pub(crate) const EMPTY_LISTING: &str =
    r#"{"kind":"Listing","data":{"children":[],"after":null,"before":null}}"#;

/// Post listing body with one post titled `title`
pub(crate) fn post_listing(title: &str) -> String {
    serde_json::json!({
        "kind": "Listing",
        "data": {
            "children": [{
                "kind": "t3",
                "data": {"id": "abc123", "title": title, "author": "testuser", "subreddit": "golang", "score": 100}
            }],
            "after": null,
            "before": null
        }
    })
    .to_string()
}

/// Client over `transport` with deterministic entropy and no credentials
pub(crate) fn test_client(transport: Arc<RecordingTransport>) -> RedditClient {
    test_client_with_config(transport, Config::default())
}

/// Client over `transport` with an explicit configuration
pub(crate) fn test_client_with_config(
    transport: Arc<RecordingTransport>,
    config: Config,
) -> RedditClient {
    RedditClient::with_parts(config, transport, Arc::new(SeededEntropy::new(42))).unwrap()
}

/// Client over `transport` that already holds test credentials
pub(crate) fn authenticated_client(transport: Arc<RecordingTransport>) -> RedditClient {
    let client = test_client(transport);
    client.session.set_credentials(test_credentials());
    client
}

/// Credentials as produced by a successful authentication
pub(crate) fn test_credentials() -> Credentials {
    Credentials::from_token_response(
        AccessTokenResponse {
            access_token: "test-token".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            scope: vec!["*".into()],
        },
        "test-loid".into(),
        "test-session".into(),
        Utc::now(),
    )
}

/// Query pairs of a recorded request
pub(crate) fn query_pairs(request: &ApiRequest) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// A single `t1` node whose replies nest `depth` comments deep, one per level
pub(crate) fn comment_chain(depth: usize) -> String {
    let last = depth.saturating_sub(1);
    let mut node = format!(r#"{{"kind":"t1","data":{{"id":"c{last}","depth":{last},"replies":""}}}}"#);
    for i in (0..last).rev() {
        node = format!(
            r#"{{"kind":"t1","data":{{"id":"c{i}","depth":{i},"replies":{{"kind":"Listing","data":{{"children":[{node}]}}}}}}}}"#
        );
    }
    node
}
