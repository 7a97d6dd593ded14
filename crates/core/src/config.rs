use crate::delivery::DeliveryPricingConfig;
use crate::error::{ComandaError, CoreResult};
use crate::loyalty::{validate_reward_cycle, validate_tiers, TierDefinition};
use crate::settings::StoreSettings;
use serde::Deserialize;
use std::path::Path;

/// Root application configuration. Loaded from an optional config file and
/// environment variables with the prefix `COMANDA__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub loyalty: LoyaltyConfig,
    #[serde(default)]
    pub delivery: DeliveryPricingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "comanda-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            loyalty: LoyaltyConfig::default(),
            delivery: DeliveryPricingConfig::default(),
        }
    }
}

// ─── Loyalty Config ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyConfig {
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TierDefinition>,
    /// Points between repeatable rewards once the top tier is reached.
    #[serde(default = "default_reward_cycle")]
    pub reward_cycle: u64,
}

fn default_tiers() -> Vec<TierDefinition> {
    vec![
        TierDefinition::new("Welcome", 0)
            .with_color("slate")
            .with_benefits(["Birthday dessert"]),
        TierDefinition::new("Green", 50)
            .with_color("green")
            .with_benefits(["Birthday dessert", "Free drink refill"]),
        TierDefinition::new("Gold", 300)
            .with_color("gold")
            .with_benefits(["Birthday dessert", "Free drink refill", "Priority delivery"]),
    ]
}
fn default_reward_cycle() -> u64 {
    100
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            reward_cycle: default_reward_cycle(),
        }
    }
}

impl LoyaltyConfig {
    pub fn validate(&self) -> CoreResult<()> {
        validate_tiers(&self.tiers)?;
        validate_reward_cycle(self.reward_cycle)
    }
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading `COMANDA__*` pairs from `env` instead
    /// of the process environment when given.
    ///
    /// Values stay strings until deserialized into their field, so numeric
    /// fields still parse while `node_id = "007"` keeps its leading zeros.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("COMANDA")
                    .separator("__")
                    .source(env),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Check every calculator input once, before any engine is built.
    pub fn validate(&self) -> CoreResult<()> {
        self.loyalty.validate()?;
        self.delivery
            .check()
            .map_err(|e| ComandaError::Configuration(format!("delivery pricing: {e}")))
    }

    /// Overlay values read from the hosted settings store.
    pub fn apply_settings(&mut self, settings: StoreSettings) {
        if let Some(tiers) = settings.tiers {
            self.loyalty.tiers = tiers;
        }
        if let Some(cycle) = settings.reward_cycle {
            self.loyalty.reward_cycle = cycle;
        }
        if let Some(rate) = settings.per_km_rate {
            self.delivery.per_km_rate = rate;
        }
        if let Some(radius) = settings.free_radius_km {
            self.delivery.free_radius_km = radius;
        }
    }
}
