//! Shard metadata sources
//!
//! The poller reads snapshots through [`MetaSource`] so the transport can be
//! swapped out (tests script responses and completion order).

use crate::error::PanelError;
use crate::snapshot::ShardMeta;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Default backend resource for shard metadata
pub const DEFAULT_META_PATH: &str = "/api/shard/meta";

/// Something that can produce the current shard metadata document
pub trait MetaSource: Send + Sync + 'static {
    /// Read the metadata once
    fn fetch(&self) -> impl Future<Output = Result<ShardMeta, PanelError>> + Send;

    /// Human-readable location, used in logs
    fn describe(&self) -> &str;
}

impl<S: MetaSource> MetaSource for std::sync::Arc<S> {
    fn fetch(&self) -> impl Future<Output = Result<ShardMeta, PanelError>> + Send {
        (**self).fetch()
    }

    fn describe(&self) -> &str {
        (**self).describe()
    }
}

/// Reads shard metadata with an HTTP GET
#[derive(Debug, Clone)]
pub struct HttpMetaSource {
    client: reqwest::Client,
    url: String,
}

impl HttpMetaSource {
    /// Build a source for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PanelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PanelError::Config(format!("HTTP client could not be built: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, source: reqwest::Error) -> PanelError {
        PanelError::Transport {
            url: self.url.clone(),
            source: Box::new(source),
        }
    }
}

impl MetaSource for HttpMetaSource {
    async fn fetch(&self) -> Result<ShardMeta, PanelError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PanelError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        debug!(url = %self.url, bytes = body.len(), "Shard metadata received");

        ShardMeta::from_slice(&body)
    }

    fn describe(&self) -> &str {
        &self.url
    }
}
