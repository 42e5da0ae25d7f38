//! Read-only snapshot viewer.
//!
//! Renders stored `.ipl` files for the terminal: the list of available
//! playlists, and a snapshot's header and items in columns with an
//! optional missing-only filter. Rendering is separated from printing
//! so the output can be asserted in tests.

use crate::model::Snapshot;
use std::fmt::Write as _;

/// Render the "available playlists" listing
pub fn render_available(snapshots: &[Snapshot]) -> String {
    let mut out = String::new();
    out.push_str("Available playlists:\n");
    for snapshot in snapshots {
        let name = snapshot.display_name.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "  {} - {} [{}]",
            snapshot.playlist_id,
            name,
            snapshot.len()
        );
    }

    out
}

/// Render one snapshot's header and items in columns
pub fn render_snapshot(snapshot: &Snapshot, missing_only: bool) -> String {
    let mut out = String::new();

    let name = snapshot.display_name.as_deref().unwrap_or("-");
    let _ = writeln!(out, " Version = {}", snapshot.version);
    let _ = writeln!(out, " Id = {}", snapshot.playlist_id);
    let _ = writeln!(out, " Title = {}", name);
    let _ = writeln!(out, " Count = {}", snapshot.len());
    out.push('\n');

    out.push_str(" Missing    Item Id      Title\n");
    out.push_str("---------  -----------  ---------------------------\n");

    for record in &snapshot.records {
        if missing_only && !record.is_missing() {
            continue;
        }
        let marker = if record.is_missing() { "    !    " } else { "         " };
        let _ = writeln!(out, "{}  {:<11}  {}", marker, record.id, record.title);
    }

    out
}
