//! Request construction
//!
//! [`RequestBuilder`] turns a logical operation into a fully addressed
//! [`ApiRequest`]: host chosen by [`RequestKind`], `raw_json=1` on data calls, and
//! the header set the Android app sends. Headers are inserted in a freshly shuffled
//! order for every request; the order carries no meaning and must not be stable.

use crate::config::parse_base_url;
use crate::entropy::Entropy;
use crate::error::Result;
use crate::session::Credentials;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// Path of the credential exchange on the public host
pub const ACCESS_TOKEN_PATH: &str = "/auth/v2/oauth/access-token/loid";

/// Scopes requested during authentication
pub const OAUTH_SCOPES: [&str; 3] = ["*", "email", "pii"];

const AUTH_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const MEDIA_CODECS: &str = "available-codecs=video/avc, video/hevc, video/x-vnd.on2.vp9";

/// Which host and header family a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Credential exchange: POST on the public host
    Auth,
    /// Authenticated read: GET on the API host with `raw_json=1`
    Data,
}

impl RequestKind {
    /// HTTP method used for this kind of request
    pub fn method(self) -> Method {
        match self {
            RequestKind::Auth => Method::POST,
            RequestKind::Data => Method::GET,
        }
    }
}

/// A request ready to hand to a [`Transport`](crate::transport::Transport)
///
/// Headers are kept as an ordered list so the insertion order chosen by the builder
/// reaches the wire unchanged.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: Url,
    /// Headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Header names in the order they will be sent
    pub fn header_names(&self) -> Vec<&str> {
        self.headers.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Set a header, replacing any existing value with the same name
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Request path, for logging
    pub fn endpoint(&self) -> &str {
        self.url.path()
    }
}

#[derive(Serialize)]
struct AccessTokenRequest {
    scopes: [&'static str; 3],
}

/// Builds requests for one client instance
#[derive(Clone)]
pub struct RequestBuilder {
    public_base: Url,
    api_base: Url,
    entropy: Arc<dyn Entropy>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("public_base", &self.public_base.as_str())
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}

impl RequestBuilder {
    /// Create a builder for the given hosts
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if either base URL does not parse.
    pub fn new(public_base_url: &str, api_base_url: &str, entropy: Arc<dyn Entropy>) -> Result<Self> {
        Ok(Self {
            public_base: parse_base_url("public_base_url", public_base_url)?,
            api_base: parse_base_url("api_base_url", api_base_url)?,
            entropy,
        })
    }

    /// Assemble a request of `kind` for `endpoint`
    ///
    /// Data requests get `raw_json=1` appended after `params`. `headers` are
    /// shuffled before being attached.
    pub fn build(
        &self,
        kind: RequestKind,
        endpoint: &str,
        params: &[(&str, &str)],
        mut headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Result<ApiRequest> {
        let base = match kind {
            RequestKind::Auth => &self.public_base,
            RequestKind::Data => &self.api_base,
        };

        let mut url = base.clone();
        url.set_path(endpoint);
        url.set_query(None);
        if kind == RequestKind::Data || !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            if kind == RequestKind::Data {
                query.append_pair("raw_json", "1");
            }
        }

        self.entropy.shuffle_headers(&mut headers);

        Ok(ApiRequest {
            method: kind.method(),
            url,
            headers,
            body,
        })
    }

    /// Credential exchange request impersonating the Android app
    pub fn auth_request(
        &self,
        client_id: &str,
        user_agent: &str,
        device_id: &str,
    ) -> Result<ApiRequest> {
        let basic = BASE64.encode(format!("{client_id}:"));
        let body = serde_json::to_vec(&AccessTokenRequest {
            scopes: OAUTH_SCOPES,
        })?;

        let headers = header_list([
            ("Authorization", format!("Basic {basic}")),
            ("User-Agent", user_agent.to_string()),
            ("X-Reddit-Device-Id", device_id.to_string()),
            ("client-vendor-id", device_id.to_string()),
            ("Content-Type", AUTH_CONTENT_TYPE.to_string()),
            ("x-reddit-retry", "algo=no-retries".to_string()),
            ("x-reddit-compression", "1".to_string()),
            ("x-reddit-qos", format!("{:.3}", self.entropy.qos())),
            ("x-reddit-media-codecs", MEDIA_CODECS.to_string()),
        ]);

        self.build(RequestKind::Auth, ACCESS_TOKEN_PATH, &[], headers, Some(body))
    }

    /// Authenticated GET for a data endpoint
    pub fn data_request(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        credentials: &Credentials,
        user_agent: &str,
    ) -> Result<ApiRequest> {
        let headers = header_list([
            ("Authorization", format!("Bearer {}", credentials.access_token)),
            ("User-Agent", user_agent.to_string()),
            ("x-reddit-loid", credentials.loid.clone()),
            ("x-reddit-session", credentials.session_id.clone()),
            ("Accept-Encoding", "gzip".to_string()),
        ]);

        self.build(RequestKind::Data, endpoint, params, headers, None)
    }

    /// Copy of `original` carrying an extra header, reshuffled
    pub fn with_header(&self, original: &ApiRequest, name: &str, value: &str) -> ApiRequest {
        let mut request = original.clone();
        request.set_header(name, value);
        self.entropy.shuffle_headers(&mut request.headers);
        request
    }
}

fn header_list<const N: usize>(headers: [(&str, String); N]) -> Vec<(String, String)> {
    headers
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Percent-encode one caller-supplied path segment
pub fn path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
