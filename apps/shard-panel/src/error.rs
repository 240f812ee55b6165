//! Domain error types for the shard panel
//!
//! Structured thiserror types so refresh failures can be told apart by
//! variant instead of by parsing message strings.
//!
//! main.rs is the ONLY module allowed to use anyhow::Result (process boundary).
//! All library code returns Result<T, PanelError>.

use thiserror::Error;

/// Shard panel domain errors
///
/// Refresh failures never reach the embedding application as errors: the
/// poller logs them, counts them under [`PanelError::error_type_label`] and
/// keeps the last good snapshot.
///
/// Example log output:
/// ```text
/// PanelError::Status { url: "http://10.0.0.7:8080/api/shard/meta", status: 503 }
/// → "shard metadata request to http://10.0.0.7:8080/api/shard/meta returned HTTP 503"
/// ```
#[derive(Error, Debug)]
pub enum PanelError {
    /// The metadata request never produced a response (connect, timeout, reset)
    #[error("shard metadata request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend answered with a non-success status
    #[error("shard metadata request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body is not a shard metadata document
    #[error("shard metadata body is malformed")]
    MalformedBody(#[source] serde_json::Error),

    /// Configuration error (environment variable missing or invalid)
    #[error("configuration error: {0}")]
    Config(String),

    /// A refresh schedule the poller cannot run (zero or oversized interval)
    #[error("invalid refresh schedule: {0}")]
    InvalidSchedule(String),

    /// A page operation named a list this panel does not show
    #[error("list '{0}' is not shown by this panel")]
    UnknownList(String),

    /// The Prometheus recorder could not be installed
    #[error("metrics recorder installation failed")]
    MetricsInstall(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PanelError {
    /// Returns a static label string suitable for Prometheus metrics.
    ///
    /// Used as the `error_type` label on `panel_refresh_failures_total`.
    pub fn error_type_label(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::MalformedBody(_) => "malformed_body",
            Self::Config(_) => "config",
            Self::InvalidSchedule(_) => "invalid_schedule",
            Self::UnknownList(_) => "unknown_list",
            Self::MetricsInstall(_) => "metrics_install",
        }
    }
}

impl From<::config::ConfigError> for PanelError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
