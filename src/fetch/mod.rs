//! Remote playlist sources

pub mod youtube;

pub use youtube::YouTubeSource;

use crate::model::RemoteItems;
use anyhow::Result;

/// A remote service playlists can be fetched from.
///
/// Implementations resolve pagination and produce one fully materialized
/// [`RemoteItems`] per playlist. A failed fetch must return an error
/// rather than an empty set: the caller skips the playlist on error, and
/// treating a transient failure as "no items" would mass-tombstone the
/// snapshot.
pub trait RemoteSource {
    /// Origin tag written into snapshot headers, e.g. `YOUTUBE`
    fn origin(&self) -> &str;

    /// Fetch the display name of a playlist
    fn playlist_name(&self, playlist_id: &str) -> Result<String>;

    /// Fetch the complete current membership of a playlist
    fn fetch_playlist(&self, playlist_id: &str) -> Result<RemoteItems>;
}
