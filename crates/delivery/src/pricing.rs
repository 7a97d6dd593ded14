//! Distance-based delivery fee with a free-delivery radius.
//!
//! Fractional charges are always rounded up to the next whole currency unit.

use comanda_core::delivery::{DeliveryPricingConfig, DeliveryQuote};
use comanda_core::error::{ComandaError, CoreResult};
use tracing::info;

const METERS_PER_KM: f64 = 1000.0;

/// Quote the delivery fee for `distance_km` under `config`.
///
/// The product is rounded up as computed in `f64`, so representation error
/// can add one unit: 1.1 km at 100/km quotes 111.
pub fn quote(distance_km: f64, config: &DeliveryPricingConfig) -> CoreResult<DeliveryQuote> {
    check_distance(distance_km)?;
    config.check()?;

    let fee = if config.has_free_radius() && distance_km <= config.free_radius_km {
        0
    } else {
        charge(distance_km * config.per_km_rate)?
    };

    Ok(DeliveryQuote { distance_km, fee })
}

/// Round up to whole units, refusing amounts a `u64` cannot hold.
fn charge(amount: f64) -> CoreResult<u64> {
    let rounded = amount.ceil();
    // 2^64 is exactly representable; anything at or above it would saturate.
    if !rounded.is_finite() || rounded >= u64::MAX as f64 {
        return Err(ComandaError::InvalidInput(format!(
            "delivery fee {amount} exceeds the largest representable amount"
        )));
    }
    Ok(rounded as u64)
}

fn check_distance(distance_km: f64) -> CoreResult<()> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(ComandaError::InvalidInput(format!(
            "distance must be a finite, non-negative number of kilometres, got {distance_km}"
        )));
    }
    Ok(())
}

/// Delivery pricer holding the store's pricing, checked once at startup.
pub struct DeliveryPricer {
    config: DeliveryPricingConfig,
}

impl DeliveryPricer {
    pub fn new(config: &DeliveryPricingConfig) -> CoreResult<Self> {
        config.check()?;
        info!(
            per_km_rate = config.per_km_rate,
            free_radius_km = config.free_radius_km,
            "Delivery pricer initialized"
        );
        Ok(Self { config: *config })
    }

    pub fn quote(&self, distance_km: f64) -> CoreResult<DeliveryQuote> {
        quote(distance_km, &self.config)
    }

    /// Quote from a routing-service distance reported in metres.
    pub fn quote_meters(&self, distance_meters: f64) -> CoreResult<DeliveryQuote> {
        check_distance(distance_meters)?;
        self.quote(distance_meters / METERS_PER_KM)
    }

    pub fn config(&self) -> &DeliveryPricingConfig {
        &self.config
    }
}
