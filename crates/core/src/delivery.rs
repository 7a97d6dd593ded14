//! Delivery pricing types: per-kilometre rate with a free-delivery radius.

use crate::error::{ComandaError, CoreResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct DeliveryPricingConfig {
    /// Currency units charged per kilometre of route distance.
    pub per_km_rate: f64,
    /// Deliveries at or within this distance are free. 0 disables the waiver.
    pub free_radius_km: f64,
}

impl Default for DeliveryPricingConfig {
    fn default() -> Self {
        Self {
            per_km_rate: 500.0,
            free_radius_km: 0.0,
        }
    }
}

impl DeliveryPricingConfig {
    /// Reject negative or non-finite rates and radii.
    pub fn check(&self) -> CoreResult<()> {
        check_non_negative("per_km_rate", self.per_km_rate)?;
        check_non_negative("free_radius_km", self.free_radius_km)
    }

    pub fn has_free_radius(&self) -> bool {
        self.free_radius_km > 0.0
    }
}

/// Fee for one delivery, in whole currency units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct DeliveryQuote {
    pub distance_km: f64,
    pub fee: u64,
}

impl DeliveryQuote {
    pub fn is_free(&self) -> bool {
        self.fee == 0
    }
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(ComandaError::InvalidInput(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(ComandaError::InvalidInput(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}
