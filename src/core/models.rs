use serde::{Deserialize, Serialize};

pub const DATE_UNKNOWN: &str = "date unknown";
pub const TITLE_UNKNOWN: &str = "title unknown";
pub const ANCHOR_UNKNOWN: &str = "anchor unknown";

/// The latest patch entry as scraped from the patch-notes page.
///
/// Missing fields hold the placeholder constants above, so a record is always
/// fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRecord {
    pub date: String,
    pub title: String,
    pub anchor_id: String,
    pub url: String,
}

impl PatchRecord {
    /// Whether a real anchor was found (as opposed to the placeholder).
    #[must_use]
    pub fn has_anchor(&self) -> bool {
        self.anchor_id != ANCHOR_UNKNOWN
    }
}

/// A `PatchRecord` as persisted in the state table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPatchState {
    pub page_identifier: String,
    #[serde(flatten)]
    pub record: PatchRecord,
    pub last_checked_timestamp: String,
}

/// One inbound text message and the reply produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub user_text: String,
    pub reply_token: String,
    pub reply_text: String,
}

/// Result of one update-checker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Neither patch container was present on the page.
    NoPatchFound,
    Unchanged {
        #[serde(flatten)]
        record: PatchRecord,
    },
    Notified {
        #[serde(flatten)]
        record: PatchRecord,
    },
}
