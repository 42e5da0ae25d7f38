//! Run orchestration

pub mod pipeline;

pub use pipeline::{RunSummary, SyncPipeline};
