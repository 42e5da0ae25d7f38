//! Tracker configuration loaded from a TOML file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one tracker run
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// API key for the remote service
    pub api_key: String,

    /// Directory holding the `.ipl` snapshot files (`~` is expanded)
    pub snapshot_dir: String,

    /// Playlist ids to track
    pub playlists: Vec<String>,
}

impl TrackerConfig {
    /// Default config file location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("playlist-tracker").join("config.toml"))
    }

    /// Load and parse the config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: TrackerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Snapshot directory with `~` expanded
    pub fn snapshot_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.snapshot_dir).as_ref())
    }

    /// Replace the tracked playlist list (CLI filter)
    pub fn with_playlists(mut self, playlists: Vec<String>) -> Self {
        self.playlists = playlists;
        self
    }
}
