//! LINE Messaging API client
//!
//! Push and reply calls, one attempt each. Tokens are never retried or
//! refreshed here; a failed send surfaces as `NotifyError`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::errors::WatchError;

const PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";
const REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Outbound messaging used by both pipelines.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a server-initiated text message to `to`.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if the request fails or is rejected.
    async fn push_text(&self, to: &str, text: &str) -> Result<(), WatchError>;

    /// Answers an inbound event identified by its single-use reply token.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if the request fails or is rejected.
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), WatchError>;
}

#[must_use]
pub fn text_messages(text: &str) -> Value {
    json!([{ "type": "text", "text": text }])
}

#[must_use]
pub fn build_push_payload(to: &str, text: &str) -> Value {
    json!({
        "to": to,
        "messages": text_messages(text),
    })
}

#[must_use]
pub fn build_reply_payload(reply_token: &str, text: &str) -> Value {
    json!({
        "replyToken": reply_token,
        "messages": text_messages(text),
    })
}

pub struct LineClient {
    http: Client,
    channel_access_token: String,
    push_endpoint: String,
    reply_endpoint: String,
}

impl LineClient {
    #[must_use]
    pub fn new(channel_access_token: String) -> Self {
        Self::with_endpoints(
            channel_access_token,
            PUSH_ENDPOINT.to_string(),
            REPLY_ENDPOINT.to_string(),
        )
    }

    /// Client talking to non-default push/reply URLs.
    #[must_use]
    pub fn with_endpoints(
        channel_access_token: String,
        push_endpoint: String,
        reply_endpoint: String,
    ) -> Self {
        Self {
            http: Client::new(),
            channel_access_token,
            push_endpoint,
            reply_endpoint,
        }
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<(), WatchError> {
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.channel_access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| WatchError::NotifyError(format!("{endpoint}: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("LINE API {} returned {}: {}", endpoint, status, text);
            return Err(WatchError::NotifyError(format!(
                "{endpoint} returned {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Messenger for LineClient {
    async fn push_text(&self, to: &str, text: &str) -> Result<(), WatchError> {
        self.post(&self.push_endpoint, &build_push_payload(to, text))
            .await?;
        info!(to = %to, "Push message sent");
        Ok(())
    }

    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), WatchError> {
        self.post(&self.reply_endpoint, &build_reply_payload(reply_token, text))
            .await?;
        info!("Reply message sent");
        Ok(())
    }
}
