use anyhow::{bail, Result};
use playlist_tracker::fetch::RemoteSource;
use playlist_tracker::model::RemoteItems;
use playlist_tracker::{SyncPipeline, TrackerConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Remote source serving a fixed in-memory playlist
struct FakeSource {
    name: String,
    items: Option<RemoteItems>,
}

impl FakeSource {
    fn serving(items: RemoteItems) -> Self {
        Self {
            name: "Test Playlist".to_string(),
            items: Some(items),
        }
    }

    fn failing() -> Self {
        Self {
            name: "Test Playlist".to_string(),
            items: None,
        }
    }
}

impl RemoteSource for FakeSource {
    fn origin(&self) -> &str {
        "FAKE"
    }

    fn playlist_name(&self, _playlist_id: &str) -> Result<String> {
        Ok(self.name.clone())
    }

    fn fetch_playlist(&self, playlist_id: &str) -> Result<RemoteItems> {
        match &self.items {
            Some(items) => Ok(items.clone()),
            None => bail!("remote service unavailable for {}", playlist_id),
        }
    }
}

fn config_for(dir: &Path) -> TrackerConfig {
    TrackerConfig {
        api_key: "unused".to_string(),
        snapshot_dir: dir.display().to_string(),
        playlists: vec!["PL1".to_string()],
    }
}

fn remote(pairs: &[(&str, &str)]) -> RemoteItems {
    pairs.iter().map(|(id, title)| (*id, *title)).collect()
}

#[test]
fn test_first_run_bootstraps_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::serving(remote(&[("a", "Song A"), ("b", "Song B")]));

    let pipeline = SyncPipeline::new(config_for(dir.path()), source).unwrap();
    let summary = pipeline.run().unwrap();

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.skipped, 0);

    let content = fs::read_to_string(dir.path().join("PL1.ipl")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("#IPL,1.1,FAKE,2,PL1,Test Playlist"));
    assert_eq!(lines.next(), Some(",a,Song A"));
    assert_eq!(lines.next(), Some(",b,Song B"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_unchanged_second_run_does_not_rewrite_file() {
    let dir = TempDir::new().unwrap();
    let items = remote(&[("a", "Song A")]);

    let pipeline =
        SyncPipeline::new(config_for(dir.path()), FakeSource::serving(items.clone())).unwrap();
    pipeline.run().unwrap();

    let path = dir.path().join("PL1.ipl");
    let before = fs::read_to_string(&path).unwrap();

    // Plant a marker the store would lose if it rewrote the file.
    fs::write(&path, before.replace("1.1", "1.0")).unwrap();

    let pipeline = SyncPipeline::new(config_for(dir.path()), FakeSource::serving(items)).unwrap();
    let summary = pipeline.run().unwrap();

    assert_eq!(summary.updated, 0);
    let after = fs::read_to_string(&path).unwrap();
    assert!(after.contains("1.0"), "unchanged snapshot was rewritten");
}

#[test]
fn test_removed_item_is_tombstoned_then_recovered() {
    let dir = TempDir::new().unwrap();

    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "Song A"), ("b", "Song B")])),
    )
    .unwrap();
    pipeline.run().unwrap();

    // "b" disappears remotely.
    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "Song A")])),
    )
    .unwrap();
    let summary = pipeline.run().unwrap();
    assert_eq!(summary.updated, 1);

    let content = fs::read_to_string(dir.path().join("PL1.ipl")).unwrap();
    assert!(content.contains("!,b,Song B"), "expected tombstone: {content}");

    // "b" comes back.
    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "Song A"), ("b", "Song B")])),
    )
    .unwrap();
    let summary = pipeline.run().unwrap();
    assert_eq!(summary.updated, 1);

    let content = fs::read_to_string(dir.path().join("PL1.ipl")).unwrap();
    assert!(content.contains(",b,Song B"));
    assert!(!content.contains("!,b,Song B"));
}

#[test]
fn test_fetch_failure_skips_playlist_and_keeps_snapshot() {
    let dir = TempDir::new().unwrap();

    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "Song A")])),
    )
    .unwrap();
    pipeline.run().unwrap();

    let path = dir.path().join("PL1.ipl");
    let before = fs::read_to_string(&path).unwrap();

    let pipeline = SyncPipeline::new(config_for(dir.path()), FakeSource::failing()).unwrap();
    let summary = pipeline.run().unwrap();

    assert_eq!(summary.checked, 0);
    assert_eq!(summary.skipped, 1);

    // No mutation, no tombstoning on a transient error.
    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_rename_only_run_updates_cache_not_snapshot() {
    let dir = TempDir::new().unwrap();

    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "Old Title")])),
    )
    .unwrap();
    pipeline.run().unwrap();

    let path = dir.path().join("PL1.ipl");
    let before = fs::read_to_string(&path).unwrap();

    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "New Title")])),
    )
    .unwrap();
    let summary = pipeline.run().unwrap();

    // Rename detection alone never dirties the snapshot.
    assert_eq!(summary.updated, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert!(before.contains("Old Title"));

    let cache = fs::read_to_string(dir.path().join("PL1.renames.json")).unwrap();
    assert!(cache.contains("New Title"));
}

#[test]
fn test_run_without_renames_creates_no_cache_file() {
    let dir = TempDir::new().unwrap();

    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "Song A")])),
    )
    .unwrap();
    pipeline.run().unwrap();
    pipeline.run().unwrap();

    assert!(!dir.path().join("PL1.renames.json").exists());
}

#[test]
fn test_rename_is_reported_for_each_playlist() {
    let dir = TempDir::new().unwrap();
    let config = TrackerConfig {
        api_key: "unused".to_string(),
        snapshot_dir: dir.path().display().to_string(),
        playlists: vec!["PL1".to_string(), "PL2".to_string()],
    };

    let pipeline = SyncPipeline::new(
        config.clone(),
        FakeSource::serving(remote(&[("a", "Old Title")])),
    )
    .unwrap();
    pipeline.run().unwrap();

    // The same item renames in both playlists; each playlist's cache
    // records it independently.
    let pipeline =
        SyncPipeline::new(config, FakeSource::serving(remote(&[("a", "New Title")]))).unwrap();
    pipeline.run().unwrap();

    for playlist_id in ["PL1", "PL2"] {
        let cache =
            fs::read_to_string(dir.path().join(format!("{}.renames.json", playlist_id))).unwrap();
        assert!(cache.contains("New Title"), "{} cache: {}", playlist_id, cache);
    }
}

#[test]
fn test_corrupt_snapshot_with_duplicate_id_is_skipped() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("PL1.ipl"),
        "#IPL,1.1,FAKE,2,PL1\n,a,First\n!,a,Second\n",
    )
    .unwrap();

    let pipeline = SyncPipeline::new(
        config_for(dir.path()),
        FakeSource::serving(remote(&[("a", "First")])),
    )
    .unwrap();
    let summary = pipeline.run().unwrap();

    assert_eq!(summary.skipped, 1);

    // The corrupt file is left for the operator, not repaired silently.
    let content = fs::read_to_string(dir.path().join("PL1.ipl")).unwrap();
    assert!(content.contains(",a,First"));
    assert!(content.contains("!,a,Second"));
}
