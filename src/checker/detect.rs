use crate::core::models::{PatchRecord, StoredPatchState};

/// Decides whether `current` is a new patch compared to the stored state.
///
/// Only `date` and `anchor_id` identify a patch entry; title wording and the
/// URL may change without a new patch being published. An absent previous
/// state always counts as changed.
#[must_use]
pub fn changed(previous: Option<&StoredPatchState>, current: &PatchRecord) -> bool {
    match previous {
        None => true,
        Some(prev) => {
            prev.record.date != current.date || prev.record.anchor_id != current.anchor_id
        }
    }
}
