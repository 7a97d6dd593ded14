//! Tier classification: which tier a member is in, how far they are toward
//! the next one, and the repeating reward cycle past the top tier.

use comanda_core::config::LoyaltyConfig;
use comanda_core::error::{ComandaError, CoreResult};
use comanda_core::loyalty::{validate_reward_cycle, validate_tiers, LoyaltyProgress, TierDefinition, TierTable};
use tracing::info;

/// Classify `lifetime_points` against a tier table.
///
/// The table must start at 0 and climb strictly; `reward_cycle` must be
/// positive. Both are checked on every call.
pub fn classify(
    lifetime_points: i64,
    tiers: &[TierDefinition],
    reward_cycle: u64,
) -> CoreResult<LoyaltyProgress> {
    validate_tiers(tiers)?;
    validate_reward_cycle(reward_cycle)?;
    classify_validated(lifetime_points, tiers, reward_cycle)
}

fn classify_validated(
    lifetime_points: i64,
    tiers: &[TierDefinition],
    reward_cycle: u64,
) -> CoreResult<LoyaltyProgress> {
    if lifetime_points < 0 {
        return Err(ComandaError::InvalidInput(format!(
            "lifetime points must not be negative, got {lifetime_points}"
        )));
    }

    // Tightest lower bound. The base tier starts at 0, so this always matches.
    let current = tiers
        .iter()
        .rposition(|tier| tier.min_points <= lifetime_points)
        .unwrap_or(0);
    let current_tier = &tiers[current];
    let next_tier = tiers.get(current + 1);

    let (progress_percent, points_to_next) = match next_tier {
        Some(next) => {
            let span = (next.min_points - current_tier.min_points) as f64;
            let earned = (lifetime_points - current_tier.min_points) as f64;
            let percent = (earned * 100.0 / span).clamp(0.0, 100.0);
            let remaining = (next.min_points - lifetime_points).max(0) as u64;
            (percent, remaining)
        }
        None => {
            // offset == 0 leaves a full cycle to go, never zero.
            let surplus = (lifetime_points - current_tier.min_points) as u64;
            let offset = surplus % reward_cycle;
            let percent = offset as f64 * 100.0 / reward_cycle as f64;
            (percent, reward_cycle - offset)
        }
    };

    Ok(LoyaltyProgress {
        current_tier: current_tier.clone(),
        next_tier: next_tier.cloned(),
        progress_percent,
        points_to_next,
    })
}

/// Loyalty engine holding a tier table validated once at startup.
pub struct LoyaltyEngine {
    tiers: TierTable,
    reward_cycle: u64,
}

impl LoyaltyEngine {
    pub fn new(config: &LoyaltyConfig) -> CoreResult<Self> {
        let tiers = TierTable::new(config.tiers.clone())?;
        validate_reward_cycle(config.reward_cycle)?;

        info!(
            tiers = tiers.len(),
            top_tier = tiers.top().map(|t| t.name.as_str()).unwrap_or_default(),
            reward_cycle = config.reward_cycle,
            "Loyalty engine initialized"
        );

        Ok(Self {
            tiers,
            reward_cycle: config.reward_cycle,
        })
    }

    /// Progress view for a member with `lifetime_points`.
    pub fn progress(&self, lifetime_points: i64) -> CoreResult<LoyaltyProgress> {
        classify_validated(lifetime_points, self.tiers.as_slice(), self.reward_cycle)
    }

    pub fn tiers(&self) -> &[TierDefinition] {
        self.tiers.as_slice()
    }

    pub fn reward_cycle(&self) -> u64 {
        self.reward_cycle
    }
}
