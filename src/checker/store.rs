//! Persistent state for the last-seen patch, one item per page identifier.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client as DynamoClient, error::DisplayErrorContext, types::AttributeValue};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{error, info};

use crate::core::config::CheckerConfig;
use crate::core::models::{PatchRecord, StoredPatchState};
use crate::errors::WatchError;

pub const KEY_ATTRIBUTE: &str = "page_identifier";

#[async_trait]
pub trait PatchStateStore: Send + Sync {
    /// Point lookup by primary key. A missing item is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read fails or the stored item is malformed.
    async fn get(&self, item_key: &str) -> Result<Option<StoredPatchState>, WatchError>;

    /// Overwrites the item for `item_key`, stamping the current check time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    async fn put(&self, item_key: &str, record: &PatchRecord) -> Result<(), WatchError>;
}

/// Formats `now` as RFC 3339 in the target timezone.
#[must_use]
pub fn checked_timestamp(now: DateTime<Utc>, timezone: Tz) -> String {
    now.with_timezone(&timezone).to_rfc3339()
}

#[must_use]
pub fn state_to_item(state: &StoredPatchState) -> HashMap<String, AttributeValue> {
    [
        (KEY_ATTRIBUTE, &state.page_identifier),
        ("date", &state.record.date),
        ("title", &state.record.title),
        ("anchor_id", &state.record.anchor_id),
        ("url", &state.record.url),
        ("last_checked_timestamp", &state.last_checked_timestamp),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), AttributeValue::S(v.clone())))
    .collect()
}

/// # Errors
///
/// Returns `StoreError` naming the first attribute that is missing or not a string.
pub fn state_from_item(
    item: &HashMap<String, AttributeValue>,
) -> Result<StoredPatchState, WatchError> {
    let attr = |name: &str| -> Result<String, WatchError> {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| {
                WatchError::StoreError(format!("stored item missing string attribute '{name}'"))
            })
    };

    Ok(StoredPatchState {
        page_identifier: attr(KEY_ATTRIBUTE)?,
        record: PatchRecord {
            date: attr("date")?,
            title: attr("title")?,
            anchor_id: attr("anchor_id")?,
            url: attr("url")?,
        },
        last_checked_timestamp: attr("last_checked_timestamp")?,
    })
}

/// DynamoDB-backed store. Last writer wins; there is no conditional write.
pub struct DynamoStateStore {
    client: DynamoClient,
    table_name: String,
    timezone: Tz,
}

impl DynamoStateStore {
    #[must_use]
    pub fn new(client: DynamoClient, table_name: String, timezone: Tz) -> Self {
        Self {
            client,
            table_name,
            timezone,
        }
    }

    pub async fn from_config(config: &CheckerConfig) -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(
            DynamoClient::new(&shared),
            config.table_name.clone(),
            config.timezone,
        )
    }
}

#[async_trait]
impl PatchStateStore for DynamoStateStore {
    async fn get(&self, item_key: &str) -> Result<Option<StoredPatchState>, WatchError> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(item_key.to_string()))
            .send()
            .await
            .map_err(|e| {
                error!(
                    "dynamodb get_item on {} failed: {}",
                    self.table_name,
                    DisplayErrorContext(&e)
                );
                WatchError::StoreError(format!("get_item: {}", DisplayErrorContext(&e)))
            })?;

        let Some(item) = resp.item() else {
            info!(item_key = %item_key, "No stored patch state yet");
            return Ok(None);
        };

        state_from_item(item).map(Some)
    }

    async fn put(&self, item_key: &str, record: &PatchRecord) -> Result<(), WatchError> {
        let state = StoredPatchState {
            page_identifier: item_key.to_string(),
            record: record.clone(),
            last_checked_timestamp: checked_timestamp(Utc::now(), self.timezone),
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(state_to_item(&state)))
            .send()
            .await
            .map_err(|e| {
                error!(
                    "dynamodb put_item on {} failed: {}",
                    self.table_name,
                    DisplayErrorContext(&e)
                );
                WatchError::StoreError(format!("put_item: {}", DisplayErrorContext(&e)))
            })?;

        info!(
            item_key = %item_key,
            date = %record.date,
            anchor_id = %record.anchor_id,
            "Saved patch state"
        );
        Ok(())
    }
}
