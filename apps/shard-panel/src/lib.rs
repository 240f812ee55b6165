//! Shard Panel - status panel for one storage shard
//!
//! - Polls the shard's metadata resource on a schedule (poller)
//! - Keeps the latest snapshot, applying responses in issue or completion order
//! - Paginates the snapshot's lists client-side (pagination)
//! - Serves the current pages, health and Prometheus metrics over HTTP (surface)

pub mod config;
pub mod error;
pub mod metrics;
pub mod pagination;
pub mod poller;
pub mod snapshot;
pub mod surface;

pub use error::PanelError;
