use patchwatch::checker::detect::changed;
use patchwatch::core::models::{PatchRecord, StoredPatchState};

fn record(date: &str, anchor_id: &str, title: &str) -> PatchRecord {
    PatchRecord {
        date: date.to_string(),
        title: title.to_string(),
        anchor_id: anchor_id.to_string(),
        url: format!("https://example.com/patch-notes/#{anchor_id}"),
    }
}

fn stored(date: &str, anchor_id: &str, title: &str) -> StoredPatchState {
    StoredPatchState {
        page_identifier: "latest_patch_info".to_string(),
        record: record(date, anchor_id, title),
        last_checked_timestamp: "2024-01-01T09:00:00+09:00".to_string(),
    }
}

#[test]
fn test_absent_previous_is_changed() {
    assert!(changed(None, &record("A", "X", "t")));
}

#[test]
fn test_same_date_and_anchor_is_unchanged_even_if_title_differs() {
    let prev = stored("A", "X", "Old wording");
    assert!(!changed(Some(&prev), &record("A", "X", "New wording")));
}

#[test]
fn test_url_difference_alone_is_unchanged() {
    let prev = stored("A", "X", "t");
    let mut current = record("A", "X", "t");
    current.url = "https://example.com/other".to_string();
    assert!(!changed(Some(&prev), &current));
}

#[test]
fn test_date_change_is_changed() {
    let prev = stored("A", "X", "t");
    assert!(changed(Some(&prev), &record("B", "X", "t")));
}

#[test]
fn test_anchor_change_is_changed() {
    let prev = stored("A", "X", "t");
    assert!(changed(Some(&prev), &record("A", "Y", "t")));
}
