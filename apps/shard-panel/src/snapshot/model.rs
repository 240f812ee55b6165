//! Snapshot value and list naming

use super::wire::ShardMeta;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Shard id shown before the first snapshot is applied
pub const UNKNOWN_SHARD: &str = "(unknown shardid)";

/// A list carried by the shard metadata document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Files stored on the shard
    Files,
    /// Content fingerprints owned by the shard
    Fingerprints,
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::Files, ListKind::Fingerprints];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Files => "files",
            ListKind::Fingerprints => "fingerprints",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "files" => Ok(ListKind::Files),
            "fingerprints" | "fingers" => Ok(ListKind::Fingerprints),
            other => Err(other.to_string()),
        }
    }
}

/// Immutable metadata snapshot for one shard
///
/// Replaced wholesale on every applied refresh, never mutated in place.
/// Lists are behind `Arc` so paginators can hold them without copying.
#[derive(Debug, Clone)]
pub struct Snapshot {
    shard: String,
    files: Arc<Vec<Value>>,
    fingerprints: Arc<Vec<Value>>,
    seq: u64,
}

impl Snapshot {
    /// Snapshot shown before any response arrives
    pub fn initial() -> Self {
        Self {
            shard: UNKNOWN_SHARD.to_string(),
            files: Arc::new(Vec::new()),
            fingerprints: Arc::new(Vec::new()),
            seq: 0,
        }
    }

    /// Build a snapshot from a parsed response to request `seq`
    pub fn from_meta(meta: ShardMeta, seq: u64) -> Self {
        Self {
            shard: meta.shard,
            files: Arc::new(meta.files),
            fingerprints: Arc::new(meta.fingerprints),
            seq,
        }
    }

    pub fn shard(&self) -> &str {
        &self.shard
    }

    /// Sequence number of the request that produced this snapshot (0 if initial)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn list(&self, kind: ListKind) -> &Arc<Vec<Value>> {
        match kind {
            ListKind::Files => &self.files,
            ListKind::Fingerprints => &self.fingerprints,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}
