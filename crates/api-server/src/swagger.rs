//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Comanda API",
        version = "0.1.0",
        description = "Loyalty club progress and delivery fee quoting for the Comanda ordering platform.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Operations", description = "Health, readiness, and liveness probes"),
        (name = "Loyalty", description = "Loyalty tiers and member progress"),
        (name = "Delivery", description = "Distance-based delivery pricing"),
    ),
    paths(
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
        // Loyalty
        crate::loyalty_rest::handle_tiers,
        crate::loyalty_rest::handle_progress,
        // Delivery
        crate::delivery_rest::handle_pricing,
        crate::delivery_rest::handle_quote,
    ),
    components(schemas(
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
        // Loyalty types
        comanda_core::loyalty::TierDefinition,
        comanda_core::loyalty::LoyaltyProgress,
        crate::loyalty_rest::ProgressRequest,
        crate::loyalty_rest::TierTableResponse,
        // Delivery types
        comanda_core::delivery::DeliveryPricingConfig,
        comanda_core::delivery::DeliveryQuote,
        crate::delivery_rest::QuoteRequest,
    ))
)]
pub struct ApiDoc;
