//! The reconciliation engine: classifies the difference between a
//! snapshot and fresh remote state and mutates the snapshot into its new
//! canonical form.
//!
//! The four classifiers run in a fixed order (added, recovered, missing,
//! renamed). Added items are emitted in the remote set's iteration order;
//! the other three follow the snapshot's positional order at scan time.
//! Re-running added/recovered/missing against the same remote state is a
//! no-op; rename detection is deliberately not idempotent, since it never
//! rewrites the snapshot title (see [`RenameCache`](super::RenameCache)).

use crate::model::{ItemRecord, Presence, RemoteItems, Snapshot};
use std::collections::HashSet;

/// A title change detected between snapshot and remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedItem {
    pub id: String,
    pub old_title: String,
    pub new_title: String,
}

/// All classified differences from one reconciliation run
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    pub added: Vec<(String, String)>,
    pub recovered: Vec<(String, String)>,
    pub missing: Vec<(String, String)>,
    pub renamed: Vec<RenamedItem>,
}

impl ReconcileOutcome {
    /// True if the snapshot was mutated and must be persisted.
    ///
    /// Renames alone never dirty the snapshot: the engine does not
    /// rewrite titles, so there is nothing new to persist.
    pub fn is_dirty(&self) -> bool {
        !self.added.is_empty() || !self.recovered.is_empty() || !self.missing.is_empty()
    }

    /// True if nothing at all was detected
    pub fn is_unchanged(&self) -> bool {
        !self.is_dirty() && self.renamed.is_empty()
    }
}

/// Run the full classification: added, recovered, missing, then renamed
pub fn reconcile(snapshot: &mut Snapshot, remote: &RemoteItems) -> ReconcileOutcome {
    let added = find_added_items(snapshot, remote);
    let recovered = find_recovered_items(snapshot, remote);
    let missing = find_missing_items(snapshot, remote);
    let renamed = find_renamed_items(snapshot, remote);

    ReconcileOutcome {
        added,
        recovered,
        missing,
        renamed,
    }
}

/// Find remote items not yet known to the snapshot.
///
/// Every unknown id is emitted as `(id, title)` and inserted into the
/// snapshot as a new `Present` record. The new records form a prefix of
/// the snapshot in remote iteration order; pre-existing records keep
/// their relative order after the prefix.
pub fn find_added_items(snapshot: &mut Snapshot, remote: &RemoteItems) -> Vec<(String, String)> {
    let known: HashSet<&str> = snapshot.records.iter().map(|r| r.id.as_str()).collect();

    let mut added = Vec::new();
    let mut prefix = Vec::new();
    for (id, title) in remote.iter() {
        if !known.contains(id) {
            log::debug!("Found unrecognized id {} - {}", id, title);
            added.push((id.to_string(), title.to_string()));
            prefix.push(ItemRecord::present(id, title));
        }
    }

    // Build the new order explicitly instead of inserting at a moving
    // index while iterating.
    if !prefix.is_empty() {
        snapshot.records.splice(0..0, prefix);
    }

    added
}

/// Find tombstoned records that have reappeared remotely.
///
/// Matching records are reset to `Present` in place. The title is kept
/// as persisted; a concurrent rename is reported separately by
/// [`find_renamed_items`].
pub fn find_recovered_items(
    snapshot: &mut Snapshot,
    remote: &RemoteItems,
) -> Vec<(String, String)> {
    let mut recovered = Vec::new();
    for record in &mut snapshot.records {
        if record.is_missing() && remote.contains(&record.id) {
            log::debug!("Found recovered id {} - {}", record.id, record.title);
            recovered.push((record.id.clone(), record.title.clone()));
            record.presence = Presence::Present;
        }
    }

    recovered
}

/// Find present records that have disappeared remotely.
///
/// Matching records are tombstoned in place; title and position are
/// preserved. Records already tombstoned are left alone and not
/// re-reported.
pub fn find_missing_items(snapshot: &mut Snapshot, remote: &RemoteItems) -> Vec<(String, String)> {
    let mut missing = Vec::new();
    for record in &mut snapshot.records {
        if !record.is_missing() && !remote.contains(&record.id) {
            log::debug!("Found missing id {} - {}", record.id, record.title);
            missing.push((record.id.clone(), record.title.clone()));
            record.presence = Presence::Missing;
        }
    }

    missing
}

/// Find records whose remote title differs from the persisted one.
///
/// Detection only: the snapshot title is not rewritten, so the same
/// rename is reported again on every run until a caller-side cache
/// suppresses it.
pub fn find_renamed_items(snapshot: &Snapshot, remote: &RemoteItems) -> Vec<RenamedItem> {
    let mut renamed = Vec::new();
    for record in &snapshot.records {
        if let Some(new_title) = remote.get(&record.id) {
            if record.title != new_title {
                renamed.push(RenamedItem {
                    id: record.id.clone(),
                    old_title: record.title.clone(),
                    new_title: new_title.to_string(),
                });
            }
        }
    }

    renamed
}
