//! Data model: item records, snapshots and fetched remote state

pub mod record;
pub mod remote;
pub mod snapshot;

pub use record::{ItemRecord, Presence};
pub use remote::RemoteItems;
pub use snapshot::{Snapshot, FORMAT_TAG, FORMAT_VERSION};
