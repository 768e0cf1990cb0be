//! Webhook Lambda handler: verify, ask the model, reply.
//!
//! Each request moves through signature verification, event dispatch, model
//! invocation and reply. Failures before the reply end the request with an
//! error status; model failures are absorbed into an apology reply.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error, info};

use super::parsing::{SIGNATURE_HEADER, extract_body, get_header_value};
use crate::ai::{BedrockModel, TextModel, reply_or_apology};
use crate::core::config::WebhookConfig;
use crate::core::models::ChatTurn;
use crate::core::response;
use crate::errors::WatchError;
use crate::line::{
    LineClient, MessageContent, Messenger, WebhookBody, WebhookEvent, verify_line_signature,
};

/// External services and secrets the webhook pipeline needs.
pub struct WebhookDeps<'a> {
    pub channel_secret: &'a str,
    pub model: &'a dyn TextModel,
    pub messenger: &'a dyn Messenger,
}

/// Production dependencies, built once at cold start.
pub struct WebhookApp {
    pub config: WebhookConfig,
    pub model: BedrockModel,
    pub messenger: LineClient,
}

impl WebhookApp {
    /// # Errors
    ///
    /// Returns `ConfigMissing` if any required variable is unset.
    pub async fn from_env() -> Result<Self, WatchError> {
        let config = WebhookConfig::from_env()?;
        let model = BedrockModel::from_config(&config).await;
        let messenger = LineClient::new(config.channel_access_token.clone());
        Ok(Self {
            config,
            model,
            messenger,
        })
    }

    #[must_use]
    pub fn deps(&self) -> WebhookDeps<'_> {
        WebhookDeps {
            channel_secret: &self.config.channel_secret,
            model: &self.model,
            messenger: &self.messenger,
        }
    }
}

/// Verifies the request and handles every event in it, in order.
///
/// Returns the chat turns that were answered.
///
/// # Errors
///
/// `BadRequest` for a missing header/body or undecodable payload,
/// `InvalidSignature` on HMAC mismatch (no event is touched), and
/// `NotifyError` if a reply cannot be sent.
pub async fn process_webhook(
    deps: &WebhookDeps<'_>,
    payload: &Value,
) -> Result<Vec<ChatTurn>, WatchError> {
    let Some(headers) = payload.get("headers") else {
        return Err(WatchError::BadRequest("Missing headers".to_string()));
    };
    let Some(signature) = get_header_value(headers, SIGNATURE_HEADER) else {
        return Err(WatchError::BadRequest(format!(
            "Missing {SIGNATURE_HEADER} header"
        )));
    };
    let body = extract_body(payload)?;

    #[cfg(feature = "debug-logs")]
    info!("Request body: {}", String::from_utf8_lossy(&body));

    if !verify_line_signature(&body, signature, deps.channel_secret) {
        return Err(WatchError::InvalidSignature);
    }
    info!("Webhook signature verified");

    let webhook: WebhookBody = serde_json::from_slice(&body)
        .map_err(|e| WatchError::BadRequest(format!("Invalid webhook body: {e}")))?;
    debug!(
        destination = ?webhook.destination,
        events = webhook.events.len(),
        "Dispatching events"
    );

    let mut turns = Vec::new();
    for event in webhook.events {
        match event {
            WebhookEvent::Message {
                reply_token,
                message: MessageContent::Text { text },
            } => {
                turns.push(handle_text_message(deps, reply_token, text).await?);
            }
            WebhookEvent::Message { .. } => {
                info!("Ignoring non-text message");
            }
            other => {
                info!(event_type = other.kind(), "Ignoring event");
            }
        }
    }

    Ok(turns)
}

async fn handle_text_message(
    deps: &WebhookDeps<'_>,
    reply_token: String,
    user_text: String,
) -> Result<ChatTurn, WatchError> {
    info!("Received text message ({} chars)", user_text.chars().count());

    let reply_text = reply_or_apology(deps.model, &user_text).await;
    deps.messenger.reply_text(&reply_token, &reply_text).await?;

    Ok(ChatTurn {
        user_text,
        reply_token,
        reply_text,
    })
}

/// Runs the pipeline and converts the result into an API Gateway response.
pub async fn handle_webhook(deps: &WebhookDeps<'_>, payload: &Value) -> Value {
    match process_webhook(deps, payload).await {
        Ok(turns) => {
            info!("Webhook handled, {} replies sent", turns.len());
            response::ok_text("OK")
        }
        Err(e) if e.status_code() == 400 => {
            error!("Rejected webhook request: {}", e);
            response::from_error(&e)
        }
        Err(e) => {
            error!("Error handling webhook event: {}", e);
            response::err_response(e.status_code(), "Error handling event")
        }
    }
}

/// Lambda handler for the webhook entrypoint.
///
/// # Errors
///
/// Never returns `Err`; configuration and pipeline failures become error
/// responses so the platform sees an HTTP status.
#[tracing::instrument(level = "info", skip(app, event))]
pub async fn function_handler(
    app: &Result<WebhookApp, WatchError>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    match app {
        Ok(app) => Ok(handle_webhook(&app.deps(), &event.payload).await),
        Err(e) => {
            error!("Config error: {}", e);
            Ok(response::from_error(e))
        }
    }
}

pub use self::function_handler as handler;
