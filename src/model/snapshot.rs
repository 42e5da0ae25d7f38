use super::ItemRecord;

/// Format tag written as the first header field of every `.ipl` file
pub const FORMAT_TAG: &str = "#IPL";

/// Current snapshot format version
pub const FORMAT_VERSION: &str = "1.1";

/// Locally persisted ordered record of a playlist's last-known item set.
///
/// The record order is significant: newly discovered items are prepended,
/// and existing records keep their relative order forever. Tombstoned
/// records stay in place rather than being removed. Item ids are unique
/// within a snapshot; the store rejects files that violate this.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Format version as loaded (or [`FORMAT_VERSION`] for new snapshots)
    pub version: String,

    /// Remote service the snapshot was taken from, e.g. `YOUTUBE`
    pub origin: String,

    /// Playlist id on the remote service
    pub playlist_id: String,

    /// Playlist display name, refreshed from the remote on each save
    pub display_name: Option<String>,

    /// Item records (ordered)
    pub records: Vec<ItemRecord>,
}

impl Snapshot {
    /// Create a new empty snapshot for a playlist
    pub fn new(playlist_id: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            origin: origin.into(),
            playlist_id: playlist_id.into(),
            display_name: None,
            records: Vec::new(),
        }
    }

    /// Number of records, tombstones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the snapshot has no records yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with this id exists (tombstoned or not)
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Number of tombstoned records
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing()).count()
    }
}
