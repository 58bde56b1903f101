//! Fetch subreddit example
//!
//! This example demonstrates the core flow of grapeddit:
//! - Creating a client with the default Android configuration
//! - Authenticating anonymously
//! - Reading a subreddit listing
//! - Loading the comment tree of the first post
//! - Cancelling in-flight requests on Ctrl+C
//!
//! Usage: `cargo run --example fetch_subreddit -- [subreddit] [sort]`

use grapeddit::{CommentSort, Config, RedditClient};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let subreddit = args.next().unwrap_or_else(|| "golang".to_string());
    let sort = args.next().unwrap_or_else(|| "hot".to_string());

    // Ctrl+C cancels whatever request is in flight
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let client = RedditClient::new(Config::default())?;

    println!("Authenticating with Reddit...");
    client.authenticate(&cancel).await?;
    println!("Successfully authenticated!");

    let listing = client.get_subreddit(&cancel, &subreddit, &sort).await?;

    println!("Found {} posts in r/{}", listing.len(), subreddit);
    for post in listing.posts().take(5) {
        println!("- {} (Score: {})", post.title, post.score);
    }

    if let Some(first) = listing.posts().next() {
        let page = client
            .get_comments(&cancel, &subreddit, &first.id, Some(CommentSort::Top))
            .await?;
        println!(
            "\n{}: {} top-level comments, {} more to load",
            page.post.title,
            page.comments.comments().count(),
            page.comments.more().count()
        );
        for comment in page.comments.comments().take(3) {
            println!("  {}: {}", comment.author, comment.body.lines().next().unwrap_or(""));
        }
    }

    Ok(())
}
