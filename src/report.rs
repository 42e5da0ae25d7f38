//! Per-item run reporting.
//!
//! One log line per classified item, using the same sigils the snapshot
//! files' consumers are used to: `+` added, `↪` recovered, `×` missing,
//! `i` renamed.

use crate::reconcile::ReconcileOutcome;

/// Announce that a playlist is being fetched
pub fn fetching(name: &str, playlist_id: &str) {
    log::info!("▶ Fetching playlist {}... [{}]", name, playlist_id);
}

/// Warn that no snapshot file exists yet for this playlist
pub fn file_not_found(file_name: &str) {
    log::warn!("  ! Could not find file {}", file_name);
}

/// Announce that the snapshot file is being (re)written
pub fn writing_file(file_name: &str) {
    log::warn!("  ! Writing to file {}", file_name);
}

/// Report a playlist that could not be fetched this run
pub fn playlist_skipped(playlist_id: &str, err: &anyhow::Error) {
    log::error!("▶ Could not check playlist [{}]: {:#}", playlist_id, err);
}

/// Log every classified item of a reconciliation run
pub fn outcome(outcome: &ReconcileOutcome) {
    for (id, title) in &outcome.added {
        log::info!("  + New item {} found [{}]", title, id);
    }
    for (id, title) in &outcome.recovered {
        log::info!("  ↪ {} was recovered [{}]", title, id);
    }
    for (id, title) in &outcome.missing {
        log::info!("  × {} is missing from the playlist [{}]", title, id);
    }
    for item in &outcome.renamed {
        log::info!(
            "  i Item was renamed from {} to {} [{}]",
            item.old_title,
            item.new_title,
            item.id
        );
    }

    if outcome.is_unchanged() {
        log::info!("  (no new changes)");
    }
}
