//! HTTP server.
//!
//! Routes:
//! - `GET /` overview page (`?chart=map|pie&top=N`)
//! - `GET /country/:name` time series figure as JSON
//! - `GET /api/top` top countries as JSON (`?n=N`)
//! - `GET /health` liveness probe

use crate::chart::Figure;
use crate::dashboard::Dashboard;
use crate::error::{DashboardError, Result};
use crate::models::{AggregatedRow, ChartKind};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    pub chart: Option<ChartKind>,
    pub top: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<usize>,
}

/// Build the application router
pub fn router(dashboard: Dashboard) -> Router {
    Router::new()
        .route("/", get(overview))
        .route("/country/:name", get(country_series))
        .route("/api/top", get(top_countries))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(dashboard)
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn serve(dashboard: Dashboard, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
    let addr = dashboard.config().listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn overview(
    State(dashboard): State<Dashboard>,
    Query(query): Query<OverviewQuery>,
) -> Result<Html<String>> {
    let page = dashboard.overview_page(query.chart, query.top).await?;
    Ok(Html(page))
}

async fn country_series(
    State(dashboard): State<Dashboard>,
    Path(name): Path<String>,
) -> Result<Json<Figure>> {
    let figure = dashboard.entity_figure(name).await?;
    Ok(Json(figure))
}

async fn top_countries(
    State(dashboard): State<Dashboard>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<AggregatedRow>>> {
    let rows = dashboard.top_rows(query.n).await?;
    Ok(Json(rows))
}

async fn health() -> &'static str {
    "ok"
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        if self.is_user_facing() {
            warn!("Request rejected: {}", self);
            return (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response();
        }

        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
