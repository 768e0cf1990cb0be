//! Scheduled patch-notes update checker

pub mod detect;
pub mod extract;
pub mod fetch;
pub mod handler;
pub mod store;

// Re-export the main handler for convenience
pub use handler::{CheckTarget, CheckerApp, CheckerDeps, handler, run_check};
