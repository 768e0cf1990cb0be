use async_trait::async_trait;
use std::sync::Mutex;

use patchwatch::core::config::NotifierConfig;
use patchwatch::errors::WatchError;
use patchwatch::line::Messenger;
use patchwatch::notify::{TEST_MESSAGE_TEXT, UPDATE_NOTICE_TEXT, notify_update, send_test_message};

#[derive(Default)]
struct RecordingMessenger {
    pushes: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn push_text(&self, to: &str, text: &str) -> Result<(), WatchError> {
        if self.fail {
            return Err(WatchError::NotifyError("HTTP 400: The request body has 1 error(s)".into()));
        }
        self.pushes
            .lock()
            .unwrap()
            .push((to.to_string(), text.to_string()));
        Ok(())
    }

    async fn reply_text(&self, _reply_token: &str, _text: &str) -> Result<(), WatchError> {
        unreachable!("notifications only push")
    }
}

fn config() -> NotifierConfig {
    NotifierConfig {
        channel_access_token: "token".to_string(),
        recipient_id: "Cgroup".to_string(),
    }
}

#[tokio::test]
async fn test_notify_update_pushes_fixed_text() {
    let messenger = RecordingMessenger::default();
    notify_update(&messenger, "Cgroup").await.unwrap();

    assert_eq!(
        *messenger.pushes.lock().unwrap(),
        vec![("Cgroup".to_string(), UPDATE_NOTICE_TEXT.to_string())]
    );
}

#[tokio::test]
async fn test_send_test_message_success() {
    let messenger = RecordingMessenger::default();
    let response = send_test_message(&messenger, &config()).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(
        messenger.pushes.lock().unwrap()[0].1,
        TEST_MESSAGE_TEXT.to_string()
    );
}

#[tokio::test]
async fn test_send_test_message_failure_is_500() {
    let messenger = RecordingMessenger {
        fail: true,
        ..RecordingMessenger::default()
    };
    let response = send_test_message(&messenger, &config()).await;

    assert_eq!(response["statusCode"], 500);
}
