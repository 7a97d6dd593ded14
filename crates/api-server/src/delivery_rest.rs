//! Delivery pricing REST API endpoints.

use crate::rest::{error_response, AppState, ErrorResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use comanda_core::delivery::{DeliveryPricingConfig, DeliveryQuote};
use comanda_core::error::ComandaError;
use serde::Deserialize;
use utoipa::ToSchema;

/// Route distance from the maps service. Exactly one unit must be given.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub distance_meters: Option<f64>,
}

/// GET /v1/delivery/pricing — Active per-km rate and free radius.
#[utoipa::path(
    get,
    path = "/v1/delivery/pricing",
    tag = "Delivery",
    responses(
        (status = 200, description = "Active delivery pricing", body = DeliveryPricingConfig),
    )
)]
pub async fn handle_pricing(State(state): State<AppState>) -> Json<DeliveryPricingConfig> {
    Json(*state.delivery.config())
}

/// POST /v1/delivery/quote — Delivery fee for a route distance.
#[utoipa::path(
    post,
    path = "/v1/delivery/quote",
    tag = "Delivery",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Fee in whole currency units", body = DeliveryQuote),
        (status = 400, description = "Missing, ambiguous, negative or non-finite distance", body = ErrorResponse),
    )
)]
pub async fn handle_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<DeliveryQuote>, (StatusCode, Json<ErrorResponse>)> {
    let quote = match (request.distance_km, request.distance_meters) {
        (Some(km), None) => state.delivery.quote(km),
        (None, Some(meters)) => state.delivery.quote_meters(meters),
        _ => Err(ComandaError::InvalidInput(
            "provide exactly one of distance_km or distance_meters".to_string(),
        )),
    }
    .map_err(error_response)?;

    metrics::counter!("delivery.api.quotes").increment(1);
    if quote.is_free() {
        metrics::counter!("delivery.api.free_quotes").increment(1);
    }
    Ok(Json(quote))
}
