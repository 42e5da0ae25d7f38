//! Playlist Tracker - playlist membership tracker
//!
//! This library tracks the membership of remote media playlists over time
//! by keeping a local `.ipl` snapshot per playlist and reconciling it
//! against freshly fetched remote state on every run.

pub mod config;
pub mod fetch;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod run;
pub mod store;
pub mod view;

pub use config::TrackerConfig;
pub use run::pipeline::SyncPipeline;
