//! Shard metadata snapshots
//!
//! The immutable value the poller publishes and the panel paginates over.

mod model;
pub mod wire;

pub use model::{ListKind, Snapshot, UNKNOWN_SHARD};
pub use wire::ShardMeta;
