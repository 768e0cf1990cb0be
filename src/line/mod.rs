//! All LINE-specific functionality

pub mod client;
pub mod events;
pub mod signature;

// Re-export main types for convenience
pub use client::{LineClient, Messenger};
pub use events::{MessageContent, WebhookBody, WebhookEvent};
pub use signature::{compute_signature, verify_line_signature};
