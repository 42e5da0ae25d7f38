//! Snapshot persistence: `.ipl` file format and on-disk store

pub mod files;
pub mod format;

pub use files::SnapshotStore;
pub use format::ParseError;
