//! Cache of already-reported renames, one cache per playlist.
//!
//! The engine's rename detector never rewrites snapshot titles, so the
//! same rename would be reported on every run. This cache remembers the
//! last reported title per item id and suppresses repeats. Caches are
//! scoped to one playlist each: an item appearing in several tracked
//! playlists is reported once per playlist, not once per run.

use super::engine::RenamedItem;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistent id -> last-reported-title map, stored as JSON
#[derive(Debug)]
pub struct RenameCache {
    path: PathBuf,
    seen: HashMap<String, String>,
    dirty: bool,
}

impl RenameCache {
    /// Load the cache, starting empty if the file is absent or unreadable
    pub fn load(path: &Path) -> Self {
        let seen = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(seen) => seen,
                Err(err) => {
                    log::warn!("Ignoring malformed rename cache {:?}: {}", path, err);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path: path.to_path_buf(),
            seen,
            dirty: false,
        }
    }

    /// Drop renames already reported with the same new title and record
    /// the rest as reported
    pub fn filter_new(&mut self, renamed: Vec<RenamedItem>) -> Vec<RenamedItem> {
        let mut fresh = Vec::new();
        for item in renamed {
            if self.seen.get(&item.id) == Some(&item.new_title) {
                log::debug!("Suppressing already-reported rename for {}", item.id);
                continue;
            }
            self.seen.insert(item.id.clone(), item.new_title.clone());
            self.dirty = true;
            fresh.push(item);
        }

        fresh
    }

    /// True if `filter_new` recorded something not yet persisted
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist the cache to its backing file
    pub fn save(&mut self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.seen)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write rename cache: {:?}", self.path))?;
        self.dirty = false;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rename(id: &str, old: &str, new: &str) -> RenamedItem {
        RenamedItem {
            id: id.to_string(),
            old_title: old.to_string(),
            new_title: new.to_string(),
        }
    }

    #[test]
    fn test_first_report_passes_through() {
        let dir = TempDir::new().unwrap();
        let mut cache = RenameCache::load(&dir.path().join("PL1.renames.json"));

        let fresh = cache.filter_new(vec![rename("1", "Old", "New")]);

        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_repeat_report_is_suppressed_across_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PL1.renames.json");

        let mut cache = RenameCache::load(&path);
        cache.filter_new(vec![rename("1", "Old", "New")]);
        cache.save().unwrap();

        let mut reloaded = RenameCache::load(&path);
        let fresh = reloaded.filter_new(vec![rename("1", "Old", "New")]);

        assert!(fresh.is_empty());
    }

    #[test]
    fn test_second_rename_of_same_item_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut cache = RenameCache::load(&dir.path().join("PL1.renames.json"));

        cache.filter_new(vec![rename("1", "Old", "New")]);
        let fresh = cache.filter_new(vec![rename("1", "Old", "Newer")]);

        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].new_title, "Newer");
    }

    #[test]
    fn test_malformed_cache_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PL1.renames.json");
        std::fs::write(&path, "not json").unwrap();

        let mut cache = RenameCache::load(&path);
        let fresh = cache.filter_new(vec![rename("1", "Old", "New")]);

        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_dirty_only_after_recording_something() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PL1.renames.json");

        let mut cache = RenameCache::load(&path);
        assert!(!cache.is_dirty());

        cache.filter_new(Vec::new());
        assert!(!cache.is_dirty());

        cache.filter_new(vec![rename("1", "Old", "New")]);
        assert!(cache.is_dirty());

        cache.save().unwrap();
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_suppressed_repeat_does_not_dirty_the_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PL1.renames.json");

        let mut cache = RenameCache::load(&path);
        cache.filter_new(vec![rename("1", "Old", "New")]);
        cache.save().unwrap();

        let mut reloaded = RenameCache::load(&path);
        reloaded.filter_new(vec![rename("1", "Old", "New")]);

        assert!(!reloaded.is_dirty());
    }
}
