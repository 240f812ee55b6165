//! Render surface and health endpoints
//!
//! JSON for an external table renderer: the shard id and, per shown list,
//! the current page, page number and totals. Also health, readiness,
//! metrics and a manual refresh trigger.

use crate::error::PanelError;
use crate::metrics::PanelMetrics;
use crate::pagination::{PageView, PanelRender, PanelView};
use crate::poller::{MetaSource, Poller, RefreshOutcome, RefreshStatus};
use crate::snapshot::ListKind;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub shard: String,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub shard: String,
    pub refresh: RefreshStatus,
}

/// Full panel response
#[derive(Debug, Serialize)]
pub struct PanelResponse {
    #[serde(flatten)]
    pub panel: PanelRender,
    pub refresh: RefreshStatus,
}

/// Page navigation request body
///
/// Any JSON number is accepted; the view clamps it into range.
#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub page: serde_json::Number,
}

impl PageRequest {
    /// Requested page, saturating at `0` and `usize::MAX`
    pub fn page_number(&self) -> usize {
        if let Some(page) = self.page.as_u64() {
            usize::try_from(page).unwrap_or(usize::MAX)
        } else if self.page.as_i64().is_some() {
            0
        } else {
            // float casts saturate
            self.page.as_f64().map_or(0, |page| page as usize)
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    error_type: &'static str,
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        let status = match self {
            PanelError::UnknownList(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
            error_type: self.error_type_label(),
        };
        (status, Json(body)).into_response()
    }
}

/// Application state for the render surface
pub struct AppState<S> {
    pub view: Arc<Mutex<PanelView>>,
    pub poller: Arc<Poller<S>>,
    pub metrics: PanelMetrics,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            poller: Arc::clone(&self.poller),
            metrics: self.metrics.clone(),
        }
    }
}

/// Create the render surface router
pub fn router<S: MetaSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route("/ready", get(ready_handler::<S>))
        .route("/metrics", get(metrics_handler::<S>))
        .route("/panel", get(panel_handler::<S>))
        .route("/panel/refresh", post(refresh_handler::<S>))
        .route("/panel/{list}", get(page_handler::<S>))
        .route("/panel/{list}/page", put(set_page_handler::<S>))
        .with_state(state)
}

fn parse_list(name: &str) -> Result<ListKind, PanelError> {
    name.parse::<ListKind>().map_err(PanelError::UnknownList)
}

/// Health endpoint - always returns 200 if process is running
async fn health_handler<S: MetaSource>(State(state): State<AppState<S>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        shard: state.poller.snapshot().shard().to_string(),
    })
}

/// Readiness endpoint - returns 200 once a snapshot has been applied
async fn ready_handler<S: MetaSource>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let refresh = state.poller.status();
    let response = ReadyResponse {
        ready: refresh.is_ready(),
        shard: state.poller.snapshot().shard().to_string(),
        refresh,
    };

    if response.ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Metrics endpoint - returns Prometheus format metrics
async fn metrics_handler<S: MetaSource>(State(state): State<AppState<S>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}

async fn panel_handler<S: MetaSource>(State(state): State<AppState<S>>) -> Json<PanelResponse> {
    let panel = state.view.lock().await.render();
    Json(PanelResponse {
        panel,
        refresh: state.poller.status(),
    })
}

async fn page_handler<S: MetaSource>(
    State(state): State<AppState<S>>,
    Path(list): Path<String>,
) -> Result<Json<PageView>, PanelError> {
    let kind = parse_list(&list)?;
    let page = state.view.lock().await.page(kind)?;
    Ok(Json(page))
}

async fn set_page_handler<S: MetaSource>(
    State(state): State<AppState<S>>,
    Path(list): Path<String>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageView>, PanelError> {
    let kind = parse_list(&list)?;
    let page = state.view.lock().await.set_page(kind, request.page_number())?;
    debug!(list = %kind, requested = %request.page, page = page.page, "Page changed");
    Ok(Json(page))
}

/// Issue one refresh and wait for it
async fn refresh_handler<S: MetaSource>(State(state): State<AppState<S>>) -> Json<RefreshOutcome> {
    Json(state.poller.refresh().await)
}
