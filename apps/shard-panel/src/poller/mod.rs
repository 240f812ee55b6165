//! Shard metadata polling
//!
//! Keeps the local snapshot eventually consistent with the backend without
//! ever blocking readers.

mod refresh;
mod source;

pub use refresh::{
    ApplyOrder, Poller, RefreshOutcome, RefreshSchedule, RefreshStatus, MAX_REFRESH_INTERVAL,
};
pub use source::{HttpMetaSource, MetaSource, DEFAULT_META_PATH};
