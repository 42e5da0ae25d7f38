/// Marker written for a tombstoned record in `.ipl` files
pub const MISSING_MARKER: &str = "!";

/// Whether an item is still present on the remote playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Item was present on the remote playlist the last time it was seen
    Present,

    /// Item has disappeared remotely; the record is kept as a tombstone
    Missing,
}

impl Presence {
    /// Parse the persisted marker (empty string or `"!"`)
    pub fn from_marker(marker: &str) -> Self {
        if marker == MISSING_MARKER {
            Presence::Missing
        } else {
            Presence::Present
        }
    }

    /// Marker written to the snapshot file
    pub fn marker(&self) -> &'static str {
        match self {
            Presence::Present => "",
            Presence::Missing => MISSING_MARKER,
        }
    }
}

/// One tracked playlist item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Presence flag (tombstone state)
    pub presence: Presence,

    /// Stable identifier assigned by the remote service
    pub id: String,

    /// Display title as last persisted (renames happen upstream)
    pub title: String,
}

impl ItemRecord {
    /// Create a record for an item currently present remotely
    pub fn present(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            presence: Presence::Present,
            id: id.into(),
            title: title.into(),
        }
    }

    /// Create a tombstoned record
    pub fn missing(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            presence: Presence::Missing,
            id: id.into(),
            title: title.into(),
        }
    }

    /// True if the record is tombstoned
    pub fn is_missing(&self) -> bool {
        self.presence == Presence::Missing
    }
}
