//! Hosted model client (Bedrock `InvokeModel`)
//!
//! Encapsulates the single-shot text generation used to answer chat messages.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::{Client as BedrockClient, error::DisplayErrorContext, primitives::Blob};
use tracing::{error, info};

use super::prompt::{APOLOGY_REPLY, build_request, parse_response};
use crate::core::config::WebhookConfig;
use crate::errors::WatchError;

#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generates a reply to `user_text` under the persona system prompt.
    ///
    /// # Errors
    ///
    /// Returns `ModelInvocationError` if the call or response decoding fails.
    async fn generate(&self, user_text: &str) -> Result<String, WatchError>;
}

pub struct BedrockModel {
    client: BedrockClient,
    model_id: String,
}

impl BedrockModel {
    #[must_use]
    pub fn new(client: BedrockClient, model_id: String) -> Self {
        Self { client, model_id }
    }

    /// Builds a runtime client pinned to the configured model region.
    pub async fn from_config(config: &WebhookConfig) -> Self {
        let shared = aws_config::from_env()
            .region(aws_config::Region::new(config.model_region.clone()))
            .load()
            .await;
        Self::new(BedrockClient::new(&shared), config.model_id.clone())
    }
}

#[async_trait]
impl TextModel for BedrockModel {
    async fn generate(&self, user_text: &str) -> Result<String, WatchError> {
        let body = serde_json::to_vec(&build_request(user_text)).map_err(|e| {
            WatchError::ModelInvocationError(format!("Failed to serialize request: {e}"))
        })?;

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                WatchError::ModelInvocationError(format!(
                    "invoke_model {}: {}",
                    self.model_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        parse_response(response.body().as_ref())
    }
}

/// Asks the model and falls back to a fixed apology on any failure, so the
/// user always gets some reply.
pub async fn reply_or_apology(model: &dyn TextModel, user_text: &str) -> String {
    #[cfg(feature = "debug-logs")]
    info!("User prompt: {}", user_text);

    match model.generate(user_text).await {
        Ok(text) => {
            #[cfg(feature = "debug-logs")]
            info!("Model reply: {}", text);

            info!("Model reply generated ({} chars)", text.chars().count());
            text
        }
        Err(e) => {
            error!("Model invocation failed: {}", e);
            APOLOGY_REPLY.to_string()
        }
    }
}
