//! HTTP API integration tests.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`:
//! - Multipart uploads run the allocation pipeline
//! - Missing or unnamed files are rejected as client errors
//! - Upload files do not outlive the request

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hydrosense_daemon::{create_router, AppState, HydrosenseConfig};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "hydrosense-test-boundary";

const STAR_NETWORK: &str = "\
[JUNCTIONS]
;ID  Elev
 A   10
 B   20
 C   30
 D   40
 HIGH 250

[PIPES]
 P1  A  B
 P2  B  C
 P3  B  D
 P4  D  HIGH
";

// ============================================================================
// Test Utilities
// ============================================================================

fn router_with(config: HydrosenseConfig) -> Router {
    create_router(AppState::new(config))
}

fn router() -> Router {
    router_with(HydrosenseConfig::default())
}

/// Build a multipart body with one part.
fn multipart_body(field: &str, filename: Option<&str>, content: &str) -> String {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
        None => format!("form-data; name=\"{}\"", field),
    };
    format!(
        "--{b}\r\nContent-Disposition: {d}\r\nContent-Type: application/octet-stream\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        d = disposition,
        c = content
    )
}

fn upload_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// ============================================================================
// Sensor Allocation
// ============================================================================

#[tokio::test]
async fn test_allocation_returns_sensors_and_mapping() {
    let body = multipart_body("file", Some("star.inp"), STAR_NETWORK);
    let (status, json) = send(router(), upload_request("/sensor-allocation", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(strings(&json["sensor_nodes"]), vec!["B"]);
    assert_eq!(json["mapping"]["A"], "B");
    assert_eq!(json["mapping"]["C"], "B");
    assert_eq!(json["mapping"]["D"], "B");
    assert_eq!(strings(&json["excluded_nodes"]), vec!["HIGH"]);
    assert!(json["run_id"].is_string());
    assert!(json["computed_at"].is_string());
}

#[tokio::test]
async fn test_threshold_query_overrides_config() {
    let body = multipart_body("file", Some("star.inp"), STAR_NETWORK);
    let (status, json) = send(
        router(),
        upload_request("/sensor-allocation?threshold=1000", body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["excluded_nodes"].as_array().unwrap().is_empty());
    assert_eq!(json["summary"]["node_count"], 5);
}

#[tokio::test]
async fn test_configured_threshold_is_used() {
    let mut config = HydrosenseConfig::default();
    config.network.elevation_threshold = 15.0;

    let body = multipart_body("file", Some("star.inp"), STAR_NETWORK);
    let (status, json) = send(
        router_with(config),
        upload_request("/sensor-allocation", body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["sensor_nodes"].as_array().unwrap().is_empty());
    assert_eq!(json["summary"]["node_count"], 0);
}

#[tokio::test]
async fn test_empty_file_yields_empty_result() {
    let body = multipart_body("file", Some("empty.inp"), "");
    let (status, json) = send(router(), upload_request("/sensor-allocation", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["sensor_nodes"].as_array().unwrap().is_empty());
    assert!(json["mapping"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_file_part_is_rejected() {
    let body = multipart_body("network", Some("star.inp"), STAR_NETWORK);
    let (status, json) = send(router(), upload_request("/sensor-allocation", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file part");
}

#[tokio::test]
async fn test_plain_form_field_is_not_a_file() {
    let body = multipart_body("file", None, STAR_NETWORK);
    let (status, json) = send(router(), upload_request("/sensor-allocation", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file part");
}

#[tokio::test]
async fn test_empty_filename_is_rejected() {
    let body = multipart_body("file", Some(""), STAR_NETWORK);
    let (status, json) = send(router(), upload_request("/sensor-allocation", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No selected file");
}

#[tokio::test]
async fn test_upload_files_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = HydrosenseConfig::default();
    config.server.upload_dir = Some(dir.path().to_path_buf());

    let body = multipart_body("file", Some("star.inp"), STAR_NETWORK);
    let (status, _) = send(router_with(config), upload_request("/sensor-allocation", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ============================================================================
// Network Summary
// ============================================================================

#[tokio::test]
async fn test_network_summary() {
    let body = multipart_body("file", Some("star.inp"), STAR_NETWORK);
    let (status, json) = send(router(), upload_request("/network/summary", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["node_count"], 4);
    assert_eq!(json["edge_count"], 3);
    assert_eq!(json["component_count"], 1);
    assert_eq!(strings(&json["excluded_nodes"]), vec!["HIGH"]);
}
