//! Error types for grapeddit
//!
//! Every failure a caller can observe is one variant of [`Error`]:
//! - calls made before authentication ([`Error::NotAuthenticated`])
//! - credential acquisition failures ([`AuthError`])
//! - transport failures, cancellation and deadlines ([`TransportError`])
//! - malformed JSON or gzip bodies ([`DecodeError`])
//! - non-200 data responses and unrecoverable content restrictions
//!
//! [`ToErrorCode`] maps each variant to a stable machine-readable code.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for grapeddit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for grapeddit
#[derive(Debug, Error)]
pub enum Error {
    /// A data operation was attempted before a successful `authenticate()`
    ///
    /// No request is sent when this is returned.
    #[error("not authenticated: call authenticate() before issuing API requests")]
    NotAuthenticated,

    /// Credential acquisition failed
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// The transport could not complete the exchange
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response body could not be decompressed or decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A data call returned a status other than 200
    #[error("API request failed with status {status}: {body}")]
    ApiStatus {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw (decompressed) response body
        body: String,
    },

    /// The server refused the content and the restriction cannot be bypassed
    #[error("content restricted: {0}")]
    RestrictedContent(RestrictionReason),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "user_agents")
        key: Option<String>,
    },

    /// A request body could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Returns true if the failure happened in the transport layer
    ///
    /// This covers both data calls and the authentication exchange.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Authentication(AuthError::Transport(_))
        )
    }

    /// Returns true if the call was aborted by the caller's cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError::Cancelled)
                | Error::Authentication(AuthError::Transport(TransportError::Cancelled))
        )
    }
}

/// Failures of the one-shot credential exchange
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request never produced a response
    #[error("authentication request failed: {0}")]
    Transport(TransportError),

    /// The token endpoint answered with a non-200 status
    #[error("authentication failed with status: {status}")]
    Status {
        /// HTTP status code returned by the token endpoint
        status: u16,
    },

    /// The token response body was not the expected JSON shape
    #[error("failed to decode OAuth response: {0}")]
    Decode(#[source] DecodeError),

    /// The token endpoint returned 200 without an access token
    #[error("OAuth response did not contain an access token")]
    EmptyToken,
}

/// Transport-level failures: the request was not answered
#[derive(Debug, Error)]
pub enum TransportError {
    /// reqwest failed to send the request or read the response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom transport reported a connection-level failure
    #[error("connection error: {0}")]
    Connection(String),

    /// The caller's cancellation token fired before a response arrived
    #[error("request cancelled")]
    Cancelled,

    /// No response arrived within the configured request timeout
    #[error("request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// Body decoding failures
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON for the expected shape
    #[error("failed to decode {context}: {source}")]
    Json {
        /// What was being decoded (e.g., "subreddit listing")
        context: &'static str,
        /// Underlying serde_json error
        #[source]
        source: serde_json::Error,
    },

    /// A gzip-encoded body was corrupt or truncated
    #[error("failed to decompress gzip body: {0}")]
    Gzip(String),
}

impl DecodeError {
    /// Wrap a serde_json error with the name of the shape being decoded
    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        DecodeError::Json { context, source }
    }
}

/// Reason the server gave for withholding content
///
/// Parsed from a `{"reason": "..."}` body returned in place of the expected payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictionReason {
    /// Community requires an explicit content-warning opt-in
    Gated,
    /// Community is quarantined and requires an explicit opt-in
    Quarantined,
    /// Community is private; no opt-in grants access
    Private,
    /// Any reason this client does not know how to handle
    Unknown(String),
}

impl RestrictionReason {
    /// Parse a server-provided reason string
    pub fn parse(reason: &str) -> Self {
        match reason {
            "gated" => RestrictionReason::Gated,
            "quarantined" => RestrictionReason::Quarantined,
            "private" => RestrictionReason::Private,
            other => RestrictionReason::Unknown(other.to_string()),
        }
    }

    /// Returns true if resending with the consent cookie can lift the restriction
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RestrictionReason::Gated | RestrictionReason::Quarantined)
    }

    /// The reason string as sent by the server
    pub fn as_str(&self) -> &str {
        match self {
            RestrictionReason::Gated => "gated",
            RestrictionReason::Quarantined => "quarantined",
            RestrictionReason::Private => "private",
            RestrictionReason::Unknown(reason) => reason,
        }
    }
}

impl fmt::Display for RestrictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictionReason::Private => {
                write!(f, "content is private and cannot be accessed")
            }
            RestrictionReason::Unknown(reason) => {
                write!(f, "unknown content restriction: {reason}")
            }
            recoverable => write!(f, "content is {} (consent required)", recoverable.as_str()),
        }
    }
}

/// Map errors to stable machine-readable codes
///
/// Callers that need to branch on the failure kind without matching nested enums
/// can compare these codes.
pub trait ToErrorCode {
    /// Get the machine-readable error code
    fn error_code(&self) -> &'static str;
}

impl ToErrorCode for Error {
    fn error_code(&self) -> &'static str {
        match self {
            Error::NotAuthenticated => "not_authenticated",
            Error::Authentication(_) => "authentication_failed",
            Error::Transport(_) => "transport_error",
            Error::Decode(_) => "decode_error",
            Error::ApiStatus { .. } => "api_status",
            Error::RestrictedContent(_) => "restricted_content",
            Error::Config { .. } => "config_error",
            Error::Serialization(_) => "serialization_error",
        }
    }
}
