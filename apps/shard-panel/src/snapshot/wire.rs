//! Backend wire format for shard metadata
//!
//! Parses the body of `GET /api/shard/meta` into a [`ShardMeta`].

use crate::error::PanelError;
use serde::Deserialize;
use serde_json::Value;

/// Shard metadata document as served by the backend
///
/// ```json
/// { "shard": "shard-07", "files": [ ... ], "fingerprints": [ ... ] }
/// ```
///
/// Absent lists are empty. Older shards name the fingerprint list `fingers`.
/// Extra fields such as `hits` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShardMeta {
    pub shard: String,
    #[serde(default)]
    pub files: Vec<Value>,
    #[serde(default, alias = "fingers")]
    pub fingerprints: Vec<Value>,
}

impl ShardMeta {
    /// Parse a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, PanelError> {
        serde_json::from_slice(body).map_err(PanelError::MalformedBody)
    }
}
