//! Fixed-text push notifications.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use crate::core::config::NotifierConfig;
use crate::core::response;
use crate::errors::WatchError;
use crate::line::{LineClient, Messenger};

/// Pushed to the recipient when a new patch is detected.
pub const UPDATE_NOTICE_TEXT: &str = "オーバーウォッチに新しいアップデートがあります！";

/// Pushed by the manual test function to confirm credentials and recipient.
pub const TEST_MESSAGE_TEXT: &str = "This is a test message from AWS Lambda.";

/// # Errors
///
/// Returns `NotifyError` if the push is rejected.
pub async fn notify_update(
    messenger: &dyn Messenger,
    recipient_id: &str,
) -> Result<(), WatchError> {
    messenger.push_text(recipient_id, UPDATE_NOTICE_TEXT).await
}

/// Sends the test message and reports the result as a structured response.
pub async fn send_test_message(messenger: &dyn Messenger, config: &NotifierConfig) -> Value {
    info!(to = %config.recipient_id, "Sending test push message");
    match messenger
        .push_text(&config.recipient_id, TEST_MESSAGE_TEXT)
        .await
    {
        Ok(()) => {
            info!("Test message sent successfully");
            response::ok_text("Test message sent")
        }
        Err(e) => {
            error!("Error sending test message: {}", e);
            response::from_error(&e)
        }
    }
}

/// Dependencies of the manual test push, built once at cold start.
pub struct TestPushApp {
    pub config: NotifierConfig,
    pub messenger: LineClient,
}

impl TestPushApp {
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the token or recipient is not set.
    pub fn from_env() -> Result<Self, WatchError> {
        let config = NotifierConfig::from_env()?;
        let messenger = LineClient::new(config.channel_access_token.clone());
        Ok(Self { config, messenger })
    }
}

/// Lambda handler for the manual test push. Configuration failures are
/// reported in the response rather than failing the runtime.
///
/// # Errors
///
/// Never returns `Err`; the signature matches the runtime's service contract.
#[tracing::instrument(level = "info", skip(app, event))]
pub async fn test_push_handler(
    app: &Result<TestPushApp, WatchError>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Test push invoked: {}", event.context.request_id);
    match app {
        Ok(app) => Ok(send_test_message(&app.messenger, &app.config).await),
        Err(e) => {
            error!("Config error: {}", e);
            Ok(response::from_error(e))
        }
    }
}
