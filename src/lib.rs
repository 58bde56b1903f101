//! # grapeddit
//!
//! Async Reddit client that authenticates the way the official Android app does.
//!
//! ## Design Philosophy
//!
//! grapeddit is designed to be:
//! - **App-faithful** - Same client id, login request, headers and consent cookie as the Android app
//! - **Sensible defaults** - `Config::default()` talks to Reddit with bundled app user agents
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Cancellable** - Every network-bound call takes a `CancellationToken`
//!
//! ## Quick Start
//!
//! ```no_run
//! use grapeddit::{Config, RedditClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RedditClient::new(Config::default())?;
//!     let cancel = CancellationToken::new();
//!
//!     client.authenticate(&cancel).await?;
//!
//!     let page = client.get_post(&cancel, "rust", "abc123").await?;
//!     println!("{} has {} top-level comments", page.post.title, page.comments.comments().count());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Reddit client and its public operations
pub mod client;
/// Configuration types
pub mod config;
/// Injectable randomness
pub mod entropy;
/// Error types
pub mod error;
/// Gzip body decoding
pub mod gzip;
/// Request construction
pub mod request;
/// Per-client session state
pub mod session;
/// HTTP transport seam
pub mod transport;
/// Response model
pub mod types;

// Re-export commonly used types
pub use client::{RedditApi, RedditClient, consent_cookie};
pub use config::{Config, RateBudgetConfig};
pub use entropy::{Entropy, SeededEntropy, ThreadRngEntropy};
pub use error::{
    AuthError, DecodeError, Error, RestrictionReason, Result, ToErrorCode, TransportError,
};
pub use session::{Credentials, SessionState};
pub use transport::{ApiResponse, ReqwestTransport, Transport};
pub use types::{
    Comment, CommentListing, CommentNode, CommentSort, Listing, ListingData, MoreComments,
    MorePlaceholder, Post, PostAndComments, PostListing, Replies, Thing, User,
};
