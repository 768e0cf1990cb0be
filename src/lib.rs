//! Patchwatch - a LINE bot that watches a game's patch-notes page and chats via a hosted model.
//!
//! This crate implements two independent Lambda handlers:
//! 1. A scheduled update checker that scrapes the patch-notes page, compares the
//!    latest entry with the last one stored in DynamoDB, and pushes a LINE
//!    notification when it changed
//! 2. A webhook handler that verifies LINE's signature, forwards the user's text
//!    to a Bedrock model, and replies with the generated answer
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - DynamoDB for the last-seen patch state
//! - Bedrock `InvokeModel` for chat replies
//! - the LINE Messaging API (push and reply) over reqwest
//! - scraper for HTML extraction
//!
//! Every external service sits behind a trait, and the binaries build the
//! production implementations once at cold start.
//!
//! # Example
//!
//! ```no_run
//! use patchwatch::checker::{CheckerApp, run_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     patchwatch::setup_logging();
//!
//!     let app = CheckerApp::from_env().await?;
//!     let outcome = run_check(&app.deps(), &app.target).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
pub mod ai;
pub mod checker;
pub mod core;
pub mod errors;
pub mod line;
pub mod notify;
pub mod webhook;

pub use errors::WatchError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at the start of each
/// Lambda binary; later calls are ignored.
///
/// # Example
///
/// ```
/// patchwatch::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(LevelFilter::INFO)
        .try_init();
}
