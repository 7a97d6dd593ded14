//! API server — REST endpoints plus the Prometheus metrics exporter.

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use crate::{delivery_rest, loyalty_rest};
use axum::routing::{get, post};
use axum::Router;
use comanda_core::config::AppConfig;
use comanda_delivery::DeliveryPricer;
use comanda_loyalty::LoyaltyEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assemble every route over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Loyalty
        .route("/v1/loyalty/tiers", get(loyalty_rest::handle_tiers))
        .route("/v1/loyalty/progress", post(loyalty_rest::handle_progress))
        // Delivery
        .route("/v1/delivery/pricing", get(delivery_rest::handle_pricing))
        .route("/v1/delivery/quote", post(delivery_rest::handle_quote))
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, loyalty: Arc<LoyaltyEngine>, delivery: Arc<DeliveryPricer>) -> Self {
        let state = AppState::new(loyalty, delivery, config.node_id.clone());
        Self { config, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Start the HTTP REST server. Runs until the listener fails.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, node_id = %self.config.node_id, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }

    /// Install the Prometheus recorder and its scrape listener.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        if !self.config.metrics.enabled {
            info!("Metrics exporter disabled");
            return Ok(());
        }

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.metrics.port);
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
