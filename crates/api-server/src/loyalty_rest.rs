//! Loyalty club REST API endpoints.

use crate::rest::{error_response, AppState, ErrorResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use comanda_core::loyalty::{LoyaltyProgress, TierDefinition};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressRequest {
    pub lifetime_points: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TierTableResponse {
    pub tiers: Vec<TierDefinition>,
    pub reward_cycle: u64,
}

/// GET /v1/loyalty/tiers — The configured tier table.
#[utoipa::path(
    get,
    path = "/v1/loyalty/tiers",
    tag = "Loyalty",
    responses(
        (status = 200, description = "Tier table and top-tier reward cycle", body = TierTableResponse),
    )
)]
pub async fn handle_tiers(State(state): State<AppState>) -> Json<TierTableResponse> {
    Json(TierTableResponse {
        tiers: state.loyalty.tiers().to_vec(),
        reward_cycle: state.loyalty.reward_cycle(),
    })
}

/// POST /v1/loyalty/progress — Tier and progress for a lifetime points total.
#[utoipa::path(
    post,
    path = "/v1/loyalty/progress",
    tag = "Loyalty",
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Current tier and progress", body = LoyaltyProgress),
        (status = 400, description = "Negative points", body = ErrorResponse),
    )
)]
pub async fn handle_progress(
    State(state): State<AppState>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<LoyaltyProgress>, (StatusCode, Json<ErrorResponse>)> {
    let progress = state
        .loyalty
        .progress(request.lifetime_points)
        .map_err(error_response)?;

    metrics::counter!("loyalty.api.progress").increment(1);
    if progress.is_top_tier() {
        metrics::counter!("loyalty.api.top_tier_views").increment(1);
    }
    Ok(Json(progress))
}
