//! HTTP routes and handlers for the hydrosense API.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use hydrosense_core::{allocate, CoverageMapping, NetworkGraph, NetworkSummary, NodeId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use super::state::AppState;
use crate::error::ApiError;
use crate::upload::{process_upload, receive_upload};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.server.max_upload_bytes();

    Router::new()
        // Health
        .route("/health", get(health))
        // Allocation
        .route("/sensor-allocation", post(sensor_allocation))
        .route("/network/summary", post(network_summary))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "hydrosense-daemon",
        "version": env!("CARGO_PKG_VERSION"),
        "core_version": hydrosense_core::version(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

// =============================================================================
// Allocation
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct AllocationParams {
    /// Per-request override of the configured elevation threshold
    threshold: Option<f64>,
}

#[derive(Serialize)]
struct AllocationResponse {
    sensor_nodes: Vec<NodeId>,
    mapping: CoverageMapping,
    excluded_nodes: Vec<NodeId>,
    summary: NetworkSummary,
    run_id: Uuid,
    computed_at: DateTime<Utc>,
}

async fn sensor_allocation(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AllocationParams>,
    mut multipart: Multipart,
) -> Result<Json<AllocationResponse>, ApiError> {
    let upload = receive_upload(&mut multipart).await?;
    let run_id = Uuid::new_v4();
    info!("Allocation {} for {}", run_id, upload.filename);

    let options = state.config.network.loader_options(params.threshold);
    let upload_dir = state.config.server.upload_dir.clone();

    let allocation = tokio::task::spawn_blocking(move || {
        process_upload(upload_dir, &upload.bytes, |sections| {
            Ok(allocate(sections, &options)?)
        })
    })
    .await??;

    Ok(Json(AllocationResponse {
        sensor_nodes: allocation.sensor_nodes.into_iter().collect(),
        mapping: allocation.mapping,
        excluded_nodes: allocation.excluded_nodes.into_iter().collect(),
        summary: allocation.summary,
        run_id,
        computed_at: Utc::now(),
    }))
}

// =============================================================================
// Network Summary
// =============================================================================

#[derive(Serialize)]
struct SummaryResponse {
    #[serde(flatten)]
    summary: NetworkSummary,
    excluded_nodes: Vec<NodeId>,
}

async fn network_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AllocationParams>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>, ApiError> {
    let upload = receive_upload(&mut multipart).await?;
    let options = state.config.network.loader_options(params.threshold);
    let upload_dir = state.config.server.upload_dir.clone();

    let response = tokio::task::spawn_blocking(move || {
        process_upload(upload_dir, &upload.bytes, |sections| {
            let (graph, excluded) = NetworkGraph::from_sections(sections, &options);
            Ok(SummaryResponse {
                summary: graph.summary(),
                excluded_nodes: excluded.into_iter().collect(),
            })
        })
    })
    .await??;

    Ok(Json(response))
}
