//! Shard Panel binary
//!
//! Polls shard metadata and serves the paginated panel, health endpoints and
//! Prometheus metrics.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Mutex;
use tracing::{error, info};

use shard_panel::config::PanelConfig;
use shard_panel::metrics::PanelMetrics;
use shard_panel::pagination::PanelView;
use shard_panel::poller::{HttpMetaSource, Poller};
use shard_panel::surface::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get log level
    let panel_config = PanelConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("shard_panel={}", panel_config.log_level).parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .json()
        .init();

    let lists: Vec<String> = panel_config.lists.iter().map(ToString::to_string).collect();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        meta_url = %panel_config.meta_url,
        schedule = ?panel_config.schedule,
        apply_order = ?panel_config.apply_order,
        lists = ?lists,
        "Starting Shard Panel"
    );

    let metrics = PanelMetrics::install()?;
    info!("Prometheus metrics initialized");

    let source = HttpMetaSource::new(panel_config.meta_url.clone(), panel_config.request_timeout)?;
    let poller = Arc::new(Poller::new(source, panel_config.apply_order, metrics.clone()));

    // The view must subscribe before the first refresh lands
    let view = Arc::new(Mutex::new(PanelView::new(
        poller.subscribe(),
        &panel_config.lists,
    )));
    poller.start(panel_config.schedule)?;

    let app_state = AppState {
        view: Arc::clone(&view),
        poller: Arc::clone(&poller),
        metrics,
    };

    let router = surface::router(app_state);
    let addr: SocketAddr = ([0, 0, 0, 0], panel_config.http_port).into();

    info!(port = panel_config.http_port, "Starting HTTP server");

    let http_server = axum::serve(tokio::net::TcpListener::bind(addr).await?, router);

    tokio::select! {
        result = http_server => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Shutting down panel...");
    poller.stop();
    // Dropping the view closes the subscription; late responses are discarded
    drop(view);

    info!("Panel shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
