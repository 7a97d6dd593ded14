//! End-to-end tests driving the REST router in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use comanda_api::{build_router, AppState};
use comanda_core::config::LoyaltyConfig;
use comanda_core::delivery::DeliveryPricingConfig;
use comanda_core::loyalty::TierDefinition;
use comanda_delivery::DeliveryPricer;
use comanda_loyalty::LoyaltyEngine;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_router() -> Router {
    let loyalty = LoyaltyEngine::new(&LoyaltyConfig {
        tiers: vec![
            TierDefinition::new("Welcome", 0),
            TierDefinition::new("Green", 50),
            TierDefinition::new("Gold", 300),
        ],
        reward_cycle: 100,
    })
    .unwrap();
    let delivery = DeliveryPricer::new(&DeliveryPricingConfig {
        per_km_rate: 500.0,
        free_radius_km: 3.0,
    })
    .unwrap();

    build_router(AppState::new(
        Arc::new(loyalty),
        Arc::new(delivery),
        "test-node".to_string(),
    ))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_progress_below_next_tier() {
    let (status, body) = send(
        test_router(),
        post_json("/v1/loyalty/progress", json!({ "lifetime_points": 49 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_tier"]["name"], "Welcome");
    assert_eq!(body["next_tier"]["name"], "Green");
    assert_eq!(body["progress_percent"], 98.0);
    assert_eq!(body["points_to_next"], 1);
}

#[tokio::test]
async fn test_progress_top_tier_cycle() {
    let (status, body) = send(
        test_router(),
        post_json("/v1/loyalty/progress", json!({ "lifetime_points": 400 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_tier"]["name"], "Gold");
    assert!(body["next_tier"].is_null());
    assert_eq!(body["progress_percent"], 0.0);
    assert_eq!(body["points_to_next"], 100);
}

#[tokio::test]
async fn test_negative_points_is_bad_request() {
    let (status, body) = send(
        test_router(),
        post_json("/v1/loyalty/progress", json!({ "lifetime_points": -5 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_tier_table_listing() {
    let (status, body) = send(test_router(), get("/v1/loyalty/tiers")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reward_cycle"], 100);
    assert_eq!(body["tiers"].as_array().unwrap().len(), 3);
    assert_eq!(body["tiers"][2]["min_points"], 300);
}

#[tokio::test]
async fn test_quote_inside_free_radius() {
    let (status, body) = send(
        test_router(),
        post_json("/v1/delivery/quote", json!({ "distance_km": 3.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fee"], 0);
    assert_eq!(body["distance_km"], 3.0);
}

#[tokio::test]
async fn test_quote_from_meters() {
    let (status, body) = send(
        test_router(),
        post_json("/v1/delivery/quote", json!({ "distance_meters": 4500.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance_km"], 4.5);
    assert_eq!(body["fee"], 2250);
}

#[tokio::test]
async fn test_quote_negative_distance_rejected() {
    let (status, body) = send(
        test_router(),
        post_json("/v1/delivery/quote", json!({ "distance_km": -1.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_quote_requires_exactly_one_distance() {
    let (status, _) = send(test_router(), post_json("/v1/delivery/quote", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        test_router(),
        post_json(
            "/v1/delivery/quote",
            json!({ "distance_km": 1.0, "distance_meters": 1000.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pricing_listing() {
    let (status, body) = send(test_router(), get("/v1/delivery/pricing")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["per_km_rate"], 500.0);
    assert_eq!(body["free_radius_km"], 3.0);
}

#[tokio::test]
async fn test_health_reports_node() {
    let (status, body) = send(test_router(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["node_id"], "test-node");
}
