//! Shared REST state, error mapping, and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use comanda_core::error::ComandaError;
use comanda_delivery::DeliveryPricer;
use comanda_loyalty::LoyaltyEngine;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub loyalty: Arc<LoyaltyEngine>,
    pub delivery: Arc<DeliveryPricer>,
    pub node_id: String,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(loyalty: Arc<LoyaltyEngine>, delivery: Arc<DeliveryPricer>, node_id: String) -> Self {
        Self {
            loyalty,
            delivery,
            node_id,
            start_time: Instant::now(),
        }
    }
}

/// Map a calculator failure onto an HTTP status.
pub fn error_response(err: ComandaError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        ComandaError::InvalidInput(_) => {
            warn!(error = %err, "Request rejected");
            metrics::counter!("api.validation_errors").increment(1);
            (StatusCode::BAD_REQUEST, "invalid_input")
        }
        ComandaError::Configuration(_) => {
            error!(error = %err, "Calculator misconfigured");
            (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
        }
        _ => {
            error!(error = %err, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live — Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}
