//! `.ipl` snapshot file format.
//!
//! A snapshot file is CSV-like: a header row
//! `#IPL,<version>,<origin>,<count>,<playlist_id>[,<display_name>]`
//! followed by one `<presence>,<id>,<title>` row per record, in snapshot
//! order. Fields containing the delimiter, quotes or newlines are quoted
//! with doubled-quote escaping so that every field round-trips exactly,
//! including empty presence markers.

use crate::model::{ItemRecord, Presence, Snapshot, FORMAT_TAG};
use std::collections::HashSet;
use std::fmt::Write as _;

/// Why a snapshot file could not be parsed
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Structural problem: the fail-open load policy treats this as an
    /// empty snapshot
    #[error("malformed snapshot file: {0}")]
    Malformed(String),

    /// Invariant violation the loader must not repair silently
    #[error("duplicate item id `{id}` in snapshot")]
    DuplicateId { id: String },
}

/// Render a snapshot to its on-disk text form
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let count = snapshot.len().to_string();
    let mut header: Vec<&str> = vec![
        FORMAT_TAG,
        snapshot.version.as_str(),
        snapshot.origin.as_str(),
        count.as_str(),
        snapshot.playlist_id.as_str(),
    ];
    if let Some(name) = &snapshot.display_name {
        header.push(name.as_str());
    }

    let mut out = String::new();
    write_row(&mut out, &header);
    for record in &snapshot.records {
        write_row(
            &mut out,
            &[
                record.presence.marker(),
                record.id.as_str(),
                record.title.as_str(),
            ],
        );
    }

    out
}

/// Parse the on-disk text form back into a snapshot
pub fn parse_snapshot(content: &str, playlist_id: &str) -> Result<Snapshot, ParseError> {
    let rows = parse_rows(content);
    let mut rows = rows.into_iter();

    let header = rows
        .next()
        .ok_or_else(|| ParseError::Malformed("empty file".to_string()))?;
    if header.len() < 5 || header[0] != FORMAT_TAG {
        return Err(ParseError::Malformed(format!(
            "bad header: {:?}",
            header
        )));
    }

    let mut snapshot = Snapshot::new(playlist_id, header[2].clone());
    snapshot.version = header[1].clone();
    snapshot.playlist_id = header[4].clone();
    snapshot.display_name = header.get(5).cloned();

    let mut ids = HashSet::new();
    for row in rows {
        if row.len() != 3 {
            return Err(ParseError::Malformed(format!(
                "expected 3 fields per record, got {}",
                row.len()
            )));
        }
        if !ids.insert(row[1].clone()) {
            return Err(ParseError::DuplicateId {
                id: row[1].clone(),
            });
        }
        snapshot.records.push(ItemRecord {
            presence: Presence::from_marker(&row[0]),
            id: row[1].clone(),
            title: row[2].clone(),
        });
    }

    let declared: Option<usize> = header[3].parse().ok();
    if declared != Some(snapshot.len()) {
        log::warn!(
            "Snapshot {} declares {} record(s) but contains {}",
            snapshot.playlist_id,
            header[3],
            snapshot.len()
        );
    }

    Ok(snapshot)
}

fn write_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            let _ = write!(out, "\"{}\"", field.replace('"', "\"\""));
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

/// Split file content into rows of fields, honoring quoted fields that
/// may span lines
fn parse_rows(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_started = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' => {}
            '\n' => {
                if row_started || !field.is_empty() || !row.is_empty() {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                row_started = false;
            }
            _ => {
                field.push(c);
                row_started = true;
            }
        }
    }

    if row_started || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
