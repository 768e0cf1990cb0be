//! Inbound webhook payload model.
//!
//! Only the fields the bot acts on are modelled; everything else in the
//! platform's event objects is ignored during deserialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    /// Empty for the console's verification request.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// Event variants keyed by their `type` tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: String,
        message: MessageContent,
    },
    Follow,
    Unfollow,
    #[serde(other)]
    Unsupported,
}

impl WebhookEvent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookEvent::Message { .. } => "message",
            WebhookEvent::Follow => "follow",
            WebhookEvent::Unfollow => "unfollow",
            WebhookEvent::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    #[serde(other)]
    Other,
}
