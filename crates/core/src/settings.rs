//! Parsing of the hosted store's generic `{ key, value }` settings rows.
//!
//! The store keeps every value as a string. Recognized keys are parsed once
//! into typed values here; callers never re-parse with local fallbacks.

use crate::error::{ComandaError, CoreResult};
use crate::loyalty::{validate_reward_cycle, validate_tiers, TierDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOYALTY_TIERS_KEY: &str = "loyalty_tiers";
pub const LOYALTY_REWARD_CYCLE_KEY: &str = "loyalty_reward_cycle";
pub const DELIVERY_PRICE_PER_KM_KEY: &str = "delivery_price_per_km";
pub const DELIVERY_FREE_RADIUS_KEY: &str = "delivery_free_radius_km";

/// One row of the settings table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsRow {
    pub key: String,
    pub value: String,
}

impl SettingsRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Read an exported settings table (a JSON array of rows).
    pub fn read_json(path: &Path) -> CoreResult<Vec<SettingsRow>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Typed view of the recognized settings. `None` means the row was absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSettings {
    pub tiers: Option<Vec<TierDefinition>>,
    pub reward_cycle: Option<u64>,
    pub per_km_rate: Option<f64>,
    pub free_radius_km: Option<f64>,
}

impl StoreSettings {
    /// Parse recognized rows. Unrelated keys are skipped; a later row for the
    /// same key replaces an earlier one.
    pub fn from_rows(rows: &[SettingsRow]) -> CoreResult<Self> {
        let mut settings = Self::default();

        for row in rows {
            match row.key.as_str() {
                LOYALTY_TIERS_KEY => {
                    let tiers: Vec<TierDefinition> = serde_json::from_str(&row.value)
                        .map_err(|e| malformed(&row.key, &e.to_string()))?;
                    validate_tiers(&tiers).map_err(|e| malformed(&row.key, &e.to_string()))?;
                    settings.tiers = Some(tiers);
                }
                LOYALTY_REWARD_CYCLE_KEY => {
                    let cycle: u64 = row
                        .value
                        .trim()
                        .parse()
                        .map_err(|_| malformed(&row.key, "expected a positive integer"))?;
                    validate_reward_cycle(cycle).map_err(|e| malformed(&row.key, &e.to_string()))?;
                    settings.reward_cycle = Some(cycle);
                }
                DELIVERY_PRICE_PER_KM_KEY => {
                    settings.per_km_rate = Some(parse_amount(row)?);
                }
                DELIVERY_FREE_RADIUS_KEY => {
                    settings.free_radius_km = Some(parse_amount(row)?);
                }
                _ => {}
            }
        }

        Ok(settings)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_amount(row: &SettingsRow) -> CoreResult<f64> {
    let value: f64 = row
        .value
        .trim()
        .parse()
        .map_err(|_| malformed(&row.key, "expected a number"))?;
    crate::delivery::check_non_negative(&row.key, value)
        .map_err(|e| malformed(&row.key, &e.to_string()))?;
    Ok(value)
}

fn malformed(key: &str, reason: &str) -> ComandaError {
    ComandaError::Configuration(format!("setting '{key}': {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_recognized_rows() {
        let rows = vec![
            SettingsRow::new(
                LOYALTY_TIERS_KEY,
                r#"[{"name":"Welcome","minPoints":0},{"name":"Gold","minPoints":200,"colorTag":"gold"}]"#,
            ),
            SettingsRow::new(LOYALTY_REWARD_CYCLE_KEY, " 150 "),
            SettingsRow::new(DELIVERY_PRICE_PER_KM_KEY, "350.5"),
            SettingsRow::new(DELIVERY_FREE_RADIUS_KEY, "2"),
            SettingsRow::new("store_name", "La Esquina"),
        ];

        let settings = StoreSettings::from_rows(&rows).unwrap();
        let tiers = settings.tiers.unwrap();
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[1].color_tag, "gold");
        assert_eq!(settings.reward_cycle, Some(150));
        assert_eq!(settings.per_km_rate, Some(350.5));
        assert_eq!(settings.free_radius_km, Some(2.0));
    }

    #[test]
    fn test_absent_rows_leave_none() {
        let settings = StoreSettings::from_rows(&[SettingsRow::new("store_open", "true")]).unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_non_numeric_rate_rejected() {
        let rows = vec![SettingsRow::new(DELIVERY_PRICE_PER_KM_KEY, "five hundred")];
        let err = StoreSettings::from_rows(&rows).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains(DELIVERY_PRICE_PER_KM_KEY));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let rows = vec![SettingsRow::new(DELIVERY_FREE_RADIUS_KEY, "-3")];
        assert!(StoreSettings::from_rows(&rows).unwrap_err().is_configuration());
    }

    #[test]
    fn test_infinite_rate_rejected() {
        let rows = vec![SettingsRow::new(DELIVERY_PRICE_PER_KM_KEY, "inf")];
        assert!(StoreSettings::from_rows(&rows).unwrap_err().is_configuration());
    }

    #[test]
    fn test_zero_cycle_rejected() {
        let rows = vec![SettingsRow::new(LOYALTY_REWARD_CYCLE_KEY, "0")];
        assert!(StoreSettings::from_rows(&rows).unwrap_err().is_configuration());
    }

    #[test]
    fn test_unsorted_tiers_rejected() {
        let rows = vec![SettingsRow::new(
            LOYALTY_TIERS_KEY,
            r#"[{"name":"Welcome","min_points":0},{"name":"Gold","min_points":300},{"name":"Green","min_points":50}]"#,
        )];
        assert!(StoreSettings::from_rows(&rows).unwrap_err().is_configuration());
    }

    #[test]
    fn test_later_row_wins() {
        let rows = vec![
            SettingsRow::new(DELIVERY_PRICE_PER_KM_KEY, "100"),
            SettingsRow::new(DELIVERY_PRICE_PER_KM_KEY, "120"),
        ];
        let settings = StoreSettings::from_rows(&rows).unwrap();
        assert_eq!(settings.per_km_rate, Some(120.0));
    }
}
