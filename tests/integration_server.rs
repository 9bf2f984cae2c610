//! End-to-end tests driving the HTTP router with in-memory datasets

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use epichart::dashboard::Dashboard;
use epichart::source::{DatasetSource, FileSource, InMemorySource};
use epichart::{DashboardConfig, server};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const MPOX_EXTRACT: &str = "\
country,iso_code,date,total_cases,total_deaths,new_cases,new_deaths
Portugal,PRT,2022-05-18,9,0,9,0
Spain,ESP,2022-05-18,7,0,7,0
Portugal,PRT,2022-05-20,14,0,5,0
Spain,ESP,2022-05-19,30,0,23,0
Portugal,PRT,2022-05-19,9,0,0,0
United Kingdom,GBR,2022-05-18,9,0,9,0
";

/// Source that always fails, standing in for an unreachable host
struct UnreachableSource;

impl DatasetSource for UnreachableSource {
    fn name(&self) -> String {
        "https://unreachable.invalid/data.csv".to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, epichart::Result<Vec<u8>>> {
        async {
            Err(epichart::DashboardError::Fetch {
                source_name: self.name(),
                reason: "connection refused".to_string(),
            })
        }
        .boxed()
    }
}

fn app_with(source: Arc<dyn DatasetSource>) -> axum::Router {
    let dashboard = Dashboard::new(DashboardConfig::default(), source).unwrap();
    server::router(dashboard)
}

fn app(csv: &str) -> axum::Router {
    app_with(Arc::new(InMemorySource::new("mpox-extract", csv)))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_root_renders_choropleth_page() {
    let (status, body) = get(app(MPOX_EXTRACT), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Plotly.newPlot"));
    assert!(body.contains("\"type\":\"choropleth\""));
    assert!(body.contains("\"locations\":[\"Portugal\",\"Spain\",\"United Kingdom\"]"));
    assert!(body.contains("\"z\":[32.0,37.0,9.0]"));
}

#[tokio::test]
async fn test_root_pie_chart_shows_top_n() {
    let (status, body) = get(app(MPOX_EXTRACT), "/?chart=pie&top=2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"type\":\"pie\""));
    assert!(body.contains("\"labels\":[\"Spain\",\"Portugal\"]"));
    assert!(body.contains("\"values\":[37.0,32.0]"));
}

#[tokio::test]
async fn test_country_route_returns_time_series_json() {
    let (status, body) = get(app(MPOX_EXTRACT), "/country/Portugal").await;
    assert_eq!(status, StatusCode::OK);

    let figure: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(figure["data"][0]["name"], "new_cases");
    assert_eq!(
        figure["data"][0]["x"],
        serde_json::json!(["2022-05-18", "2022-05-19", "2022-05-20"])
    );
    assert_eq!(figure["data"][0]["y"], serde_json::json!([9.0, 0.0, 5.0]));
    assert_eq!(figure["data"][1]["name"], "new_deaths");
}

#[tokio::test]
async fn test_country_route_decodes_path() {
    let (status, body) = get(app(MPOX_EXTRACT), "/country/United%20Kingdom").await;
    assert_eq!(status, StatusCode::OK);

    let figure: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(figure["data"][0]["y"], serde_json::json!([9.0]));
}

#[tokio::test]
async fn test_unknown_country_is_empty_chart() {
    let (status, body) = get(app(MPOX_EXTRACT), "/country/Z").await;
    assert_eq!(status, StatusCode::OK);

    let figure: Value = serde_json::from_str(&body).unwrap();
    let traces = figure["data"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    for trace in traces {
        assert!(trace["x"].as_array().unwrap().is_empty());
        assert!(trace["y"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_missing_columns_are_explained_to_the_user() {
    let (status, body) = get(app("nation,confirmed\nA,1\n"), "/").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("No key column found"));
    assert!(body.contains("nation, confirmed"));
}

#[tokio::test]
async fn test_fetch_failure_is_generic_server_error() {
    let (status, body) = get(app_with(Arc::new(UnreachableSource)), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn test_api_top_returns_rows() {
    let (status, body) = get(app(MPOX_EXTRACT), "/api/top?n=1").await;
    assert_eq!(status, StatusCode::OK);

    let rows: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(rows, serde_json::json!([{"key": "Spain", "total": 37.0}]));
}

#[tokio::test]
async fn test_unknown_chart_kind_is_bad_request() {
    let (status, _) = get(app(MPOX_EXTRACT), "/?chart=bar").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(MPOX_EXTRACT), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_file_source_serves_same_results() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("mpox.csv");
    std::fs::write(&path, MPOX_EXTRACT).unwrap();

    let (status, body) = get(app_with(Arc::new(FileSource::new(path))), "/api/top?n=3").await;
    assert_eq!(status, StatusCode::OK);

    let rows: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(rows[0]["key"], "Spain");
    assert_eq!(rows[2]["key"], "United Kingdom");
}
