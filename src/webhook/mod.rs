//! Webhook Lambda handler and request parsing

pub mod handler;
pub mod parsing;

// Re-export the main handler for convenience
pub use handler::{WebhookApp, WebhookDeps, handle_webhook, handler, process_webhook};
