//! Loyalty club domain types — tier table and derived progress view.
//!
//! Tiers are unlocked by lifetime points (never decremented by redemptions).
//! Past the top tier, members progress through a repeating reward cycle.

use crate::error::{ComandaError, CoreResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Tier Table ─────────────────────────────────────────────────────────────

/// A loyalty membership level unlocked at a cumulative points threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct TierDefinition {
    pub name: String,
    /// Inclusive lower bound. The upper bound is the next tier's threshold.
    #[serde(alias = "minPoints")]
    pub min_points: i64,
    #[serde(default, alias = "colorTag")]
    pub color_tag: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl TierDefinition {
    pub fn new(name: impl Into<String>, min_points: i64) -> Self {
        Self {
            name: name.into(),
            min_points,
            color_tag: String::new(),
            benefits: Vec::new(),
        }
    }

    pub fn with_color(mut self, color_tag: impl Into<String>) -> Self {
        self.color_tag = color_tag.into();
        self
    }

    pub fn with_benefits<I, S>(mut self, benefits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.benefits = benefits.into_iter().map(Into::into).collect();
        self
    }
}

/// Check that a tier table starts at zero and climbs strictly.
///
/// Equal thresholds are rejected: two tiers sharing a lower bound leave the
/// first one unreachable and make its progress span zero.
pub fn validate_tiers(tiers: &[TierDefinition]) -> CoreResult<()> {
    let first = tiers
        .first()
        .ok_or_else(|| ComandaError::Configuration("tier table is empty".to_string()))?;

    if first.min_points != 0 {
        return Err(ComandaError::Configuration(format!(
            "lowest tier '{}' must start at 0 points, found {}",
            first.name, first.min_points
        )));
    }

    for pair in tiers.windows(2) {
        if pair[1].min_points <= pair[0].min_points {
            return Err(ComandaError::Configuration(format!(
                "tier '{}' ({}) must have a higher threshold than '{}' ({})",
                pair[1].name, pair[1].min_points, pair[0].name, pair[0].min_points
            )));
        }
    }

    Ok(())
}

/// Check the top-tier reward interval.
pub fn validate_reward_cycle(reward_cycle: u64) -> CoreResult<()> {
    if reward_cycle == 0 {
        return Err(ComandaError::Configuration(
            "reward cycle must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Tier table that has passed [`validate_tiers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable(Vec<TierDefinition>);

impl TierTable {
    pub fn new(tiers: Vec<TierDefinition>) -> CoreResult<Self> {
        validate_tiers(&tiers)?;
        Ok(Self(tiers))
    }

    pub fn as_slice(&self) -> &[TierDefinition] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn top(&self) -> Option<&TierDefinition> {
        self.0.last()
    }
}

// ─── Progress ───────────────────────────────────────────────────────────────

/// Where a member stands: current tier, the next one, and how far along.
///
/// Computed on demand from lifetime points; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct LoyaltyProgress {
    pub current_tier: TierDefinition,
    /// `None` once the top tier is reached; progress then tracks the reward cycle.
    pub next_tier: Option<TierDefinition>,
    /// Percentage in [0, 100].
    pub progress_percent: f64,
    pub points_to_next: u64,
}

impl LoyaltyProgress {
    pub fn is_top_tier(&self) -> bool {
        self.next_tier.is_none()
    }
}
