//! Reconciliation of a persisted snapshot against fetched remote state

pub mod engine;
pub mod rename_cache;

pub use engine::{
    find_added_items, find_missing_items, find_recovered_items, find_renamed_items, reconcile,
    ReconcileOutcome, RenamedItem,
};
pub use rename_cache::RenameCache;
