//! YouTube Data API v3 playlist source.
//!
//! Uses the `playlists` endpoint for display names and the paginated
//! `playlistItems` endpoint (50 items per page) for membership. Items
//! map `snippet.resourceId.videoId` to `snippet.title`.

use super::RemoteSource;
use crate::model::RemoteItems;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use ureq::Agent;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: &str = "50";

/// Playlist source backed by the YouTube Data API
pub struct YouTubeSource {
    agent: Agent,
    api_key: String,
    base_url: String,
}

impl YouTubeSource {
    /// Create a source using the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            agent: Agent::new_with_defaults(),
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (for tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl RemoteSource for YouTubeSource {
    fn origin(&self) -> &str {
        "YOUTUBE"
    }

    fn playlist_name(&self, playlist_id: &str) -> Result<String> {
        let url = format!("{}/playlists", self.base_url);
        let mut response = self
            .agent
            .get(url.as_str())
            .query("key", &self.api_key)
            .query("id", playlist_id)
            .query("part", "snippet")
            .query("maxResults", "1")
            .call()
            .with_context(|| format!("Failed to query playlist {}", playlist_id))?;

        let parsed: PlaylistListResponse = response
            .body_mut()
            .read_json()
            .context("Failed to decode playlist response")?;

        match parsed.items.into_iter().next() {
            Some(playlist) => Ok(playlist.snippet.title),
            None => bail!("Playlist {} not found", playlist_id),
        }
    }

    fn fetch_playlist(&self, playlist_id: &str) -> Result<RemoteItems> {
        let url = format!("{}/playlistItems", self.base_url);
        let mut items = RemoteItems::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let mut request = self
                .agent
                .get(url.as_str())
                .query("key", &self.api_key)
                .query("playlistId", playlist_id)
                .query("part", "snippet")
                .query("maxResults", PAGE_SIZE);
            if let Some(token) = &page_token {
                request = request.query("pageToken", token);
            }

            let page: PlaylistItemsResponse = request
                .call()
                .with_context(|| format!("Failed to fetch items of playlist {}", playlist_id))?
                .body_mut()
                .read_json()
                .context("Failed to decode playlist items response")?;

            page_token = collect_page(page, &mut items);
            pages += 1;

            if page_token.is_none() {
                break;
            }
        }

        log::debug!(
            "Fetched {} item(s) over {} page(s) from playlist {}",
            items.len(),
            pages,
            playlist_id
        );
        Ok(items)
    }
}

/// Merge one response page into the accumulated items and return the
/// next page token, if any
fn collect_page(page: PlaylistItemsResponse, items: &mut RemoteItems) -> Option<String> {
    for item in page.items {
        items.insert(item.snippet.resource_id.video_id, item.snippet.title);
    }

    page.next_page_token
}

#[derive(Debug, Deserialize)]
struct PlaylistListResponse {
    #[serde(default)]
    items: Vec<PlaylistResource>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    snippet: PlaylistSnippet,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItemResource>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemResource {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemSnippet {
    title: String,
    #[serde(rename = "resourceId")]
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: String,
}
