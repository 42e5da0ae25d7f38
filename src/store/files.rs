//! On-disk snapshot store.
//!
//! One `.ipl` file per playlist under a single directory. Loading is
//! fail-open: an absent or malformed file bootstraps an empty snapshot.
//! A duplicate item id is the one violation that is rejected instead,
//! since silently picking one record would mask data corruption. Saves
//! go through a temporary file renamed over the target so a crash never
//! leaves a truncated snapshot behind.

use super::format::{parse_snapshot, render_snapshot, ParseError};
use crate::model::Snapshot;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Store managing the snapshot files of all tracked playlists
#[derive(Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            log::warn!("Snapshot directory {:?} not found, creating it", dir);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create snapshot directory: {:?}", dir))?;
        }

        Ok(Self { dir })
    }

    /// Path of the snapshot file for a playlist
    pub fn snapshot_path(&self, playlist_id: &str) -> PathBuf {
        self.dir.join(format!("{}.ipl", playlist_id))
    }

    /// Path of the rename cache for one playlist
    pub fn rename_cache_path(&self, playlist_id: &str) -> PathBuf {
        self.dir.join(format!("{}.renames.json", playlist_id))
    }

    /// Whether a snapshot file exists for this playlist
    pub fn exists(&self, playlist_id: &str) -> bool {
        self.snapshot_path(playlist_id).exists()
    }

    /// Load the snapshot for a playlist.
    ///
    /// Absent or malformed files yield an empty snapshot so a first run
    /// bootstraps cleanly. A duplicate item id is an error; the caller
    /// should skip the playlist rather than reconcile against a corrupt
    /// snapshot.
    pub fn load(&self, playlist_id: &str, origin: &str) -> Result<Snapshot> {
        let path = self.snapshot_path(playlist_id);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::debug!("No readable snapshot at {:?} ({}), starting empty", path, err);
                return Ok(Snapshot::new(playlist_id, origin));
            }
        };

        match parse_snapshot(&content, playlist_id) {
            Ok(snapshot) => {
                log::debug!(
                    "Read {} record(s) from {:?}, {} marked missing",
                    snapshot.len(),
                    path,
                    snapshot.missing_count()
                );
                Ok(snapshot)
            }
            Err(err @ ParseError::DuplicateId { .. }) => Err(err)
                .with_context(|| format!("Refusing corrupt snapshot: {:?}", path)),
            Err(err) => {
                log::warn!("Ignoring malformed snapshot {:?}: {}", path, err);
                Ok(Snapshot::new(playlist_id, origin))
            }
        }
    }

    /// Read the snapshot for a playlist, erroring on absent or
    /// unparseable files.
    ///
    /// This is the strict counterpart of [`load`](Self::load) for
    /// read-only viewing, where bootstrapping an empty snapshot would
    /// hide the problem instead of reporting it.
    pub fn read(&self, playlist_id: &str) -> Result<Snapshot> {
        let path = self.snapshot_path(playlist_id);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot: {:?}", path))?;

        parse_snapshot(&content, playlist_id)
            .with_context(|| format!("Failed to parse snapshot: {:?}", path))
    }

    /// List all snapshots stored in this directory, ordered by playlist
    /// id. Unreadable files are logged and skipped.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        let mut snapshots = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list snapshot directory: {:?}", self.dir))?
        {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("ipl") {
                continue;
            }
            let Some(playlist_id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match self.read(playlist_id) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(err) => log::warn!("Skipping unreadable snapshot {:?}: {:#}", path, err),
            }
        }
        snapshots.sort_by(|a, b| a.playlist_id.cmp(&b.playlist_id));

        Ok(snapshots)
    }

    /// Write a snapshot, replacing any previous file atomically
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.snapshot_path(&snapshot.playlist_id);
        log::debug!("Writing {} record(s) to {:?}", snapshot.len(), path);

        let content = render_snapshot(snapshot);

        // Temp file in the same directory so the final rename stays on
        // one filesystem.
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("Failed to create temp file in {:?}", self.dir))?;
        tmp.write_all(content.as_bytes())
            .context("Failed to write snapshot contents")?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to replace snapshot: {:?}", path))?;

        Ok(())
    }
}
