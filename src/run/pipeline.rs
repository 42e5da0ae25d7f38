//! Main sync pipeline orchestration

use crate::config::TrackerConfig;
use crate::fetch::RemoteSource;
use crate::reconcile::{reconcile, ReconcileOutcome, RenameCache};
use crate::report;
use crate::store::SnapshotStore;
use anyhow::{Context, Result};

/// Counts for one full run across all configured playlists
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Playlists checked to completion
    pub checked: usize,

    /// Playlists whose snapshot file was rewritten
    pub updated: usize,

    /// Playlists skipped because of a fetch or load error
    pub skipped: usize,
}

/// Main sync pipeline: load, fetch, reconcile, maybe save - one playlist
/// at a time
pub struct SyncPipeline<S: RemoteSource> {
    config: TrackerConfig,
    store: SnapshotStore,
    source: S,
}

impl<S: RemoteSource> SyncPipeline<S> {
    /// Create a new pipeline over the configured snapshot directory
    pub fn new(config: TrackerConfig, source: S) -> Result<Self> {
        let store = SnapshotStore::new(config.snapshot_dir())?;

        Ok(Self {
            config,
            store,
            source,
        })
    }

    /// Check every configured playlist in order.
    ///
    /// A failure on one playlist is reported and skipped; the run
    /// continues with the next. Each playlist is processed to completion
    /// before the next begins.
    pub fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for playlist_id in &self.config.playlists {
            match self.check_playlist(playlist_id) {
                Ok(outcome) => {
                    summary.checked += 1;
                    if outcome.is_dirty() {
                        summary.updated += 1;
                    }
                }
                Err(err) => {
                    report::playlist_skipped(playlist_id, &err);
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Load, fetch, reconcile and persist a single playlist.
    ///
    /// Any error before reconciliation leaves the snapshot file
    /// untouched: a playlist whose fetch fails is never reconciled, so a
    /// transient remote error cannot tombstone its items.
    fn check_playlist(&self, playlist_id: &str) -> Result<ReconcileOutcome> {
        let name = self
            .source
            .playlist_name(playlist_id)
            .with_context(|| format!("Failed to resolve playlist {}", playlist_id))?;
        report::fetching(&name, playlist_id);

        let file_name = format!("{}.ipl", playlist_id);
        if !self.store.exists(playlist_id) {
            report::file_not_found(&file_name);
        }

        let mut snapshot = self.store.load(playlist_id, self.source.origin())?;

        let remote = self
            .source
            .fetch_playlist(playlist_id)
            .with_context(|| format!("Failed to fetch playlist {}", playlist_id))?;

        snapshot.display_name = Some(name);

        let mut outcome = reconcile(&mut snapshot, &remote);

        let mut rename_cache = RenameCache::load(&self.store.rename_cache_path(playlist_id));
        outcome.renamed = rename_cache.filter_new(outcome.renamed);
        report::outcome(&outcome);

        // Only a recorded rename touches the cache file; a run without
        // renames must not create or rewrite it.
        if rename_cache.is_dirty() {
            rename_cache.save()?;
        }

        if outcome.is_dirty() {
            report::writing_file(&file_name);
            self.store.save(&snapshot)?;
        }

        Ok(outcome)
    }
}
