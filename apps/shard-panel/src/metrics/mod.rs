//! Prometheus metrics module
//!
//! Refresh outcomes, refresh latency and list sizes.

use crate::error::PanelError;
use crate::snapshot::ListKind;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Duration;

/// Panel metrics collector
///
/// Recording goes through the `metrics` facade, so a collector without an
/// installed recorder (tests, embedded use) records into nothing.
#[derive(Clone, Default)]
pub struct PanelMetrics {
    handle: Option<Arc<PrometheusHandle>>,
}

impl PanelMetrics {
    /// Install the process-wide Prometheus recorder and return a collector for it
    pub fn install() -> Result<Self, PanelError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| PanelError::MetricsInstall(Box::new(e)))?;

        Self::register_metrics();

        Ok(Self {
            handle: Some(Arc::new(handle)),
        })
    }

    /// Collector with no exporter behind it
    pub fn detached() -> Self {
        Self::default()
    }

    /// Register metric descriptions
    fn register_metrics() {
        describe_counter!(
            "panel_refreshes_applied_total",
            Unit::Count,
            "Shard metadata responses applied to the panel"
        );
        describe_counter!(
            "panel_refresh_failures_total",
            Unit::Count,
            "Shard metadata refreshes that failed"
        );
        describe_counter!(
            "panel_refreshes_stale_total",
            Unit::Count,
            "Responses discarded because a newer request was already applied"
        );
        describe_counter!(
            "panel_refreshes_dropped_total",
            Unit::Count,
            "Responses dropped because the panel view was closed"
        );

        describe_histogram!(
            "panel_refresh_duration_seconds",
            Unit::Seconds,
            "Time to fetch shard metadata"
        );

        describe_gauge!(
            "panel_list_items",
            Unit::Count,
            "Items in each list of the applied snapshot"
        );
    }

    pub fn record_applied(&self) {
        counter!("panel_refreshes_applied_total").increment(1);
    }

    pub fn record_failure(&self, error_type: &'static str) {
        counter!("panel_refresh_failures_total", "error_type" => error_type).increment(1);
    }

    pub fn record_stale(&self) {
        counter!("panel_refreshes_stale_total").increment(1);
    }

    pub fn record_dropped(&self) {
        counter!("panel_refreshes_dropped_total").increment(1);
    }

    pub fn record_refresh_duration(&self, duration: Duration) {
        histogram!("panel_refresh_duration_seconds").record(duration.as_secs_f64());
    }

    pub fn set_list_items(&self, kind: ListKind, count: usize) {
        gauge!("panel_list_items", "list" => kind.as_str()).set(count as f64);
    }

    /// Render metrics in Prometheus format
    pub fn render(&self) -> String {
        self.handle
            .as_ref()
            .map(|handle| handle.render())
            .unwrap_or_default()
    }
}
