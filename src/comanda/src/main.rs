//! Comanda — loyalty progress and delivery pricing service for restaurant ordering.
//!
//! Main entry point: loads and validates configuration, builds the engines,
//! then serves HTTP or answers a one-shot query.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comanda_api::ApiServer;
use comanda_core::config::AppConfig;
use comanda_core::settings::{SettingsRow, StoreSettings};
use comanda_delivery::DeliveryPricer;
use comanda_loyalty::LoyaltyEngine;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_LOG_FILTER: &str =
    "comanda=info,comanda_api=info,comanda_loyalty=info,comanda_delivery=info,tower_http=info";

#[derive(Parser, Debug)]
#[command(name = "comanda")]
#[command(about = "Loyalty progress and delivery pricing for restaurant ordering")]
#[command(version)]
struct Cli {
    /// Config file (TOML or JSON); environment variables still apply on top
    #[arg(long, global = true, env = "COMANDA_CONFIG")]
    config: Option<PathBuf>,

    /// Exported settings table (JSON array of {key, value} rows)
    #[arg(long, global = true, env = "COMANDA_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the REST API (default)
    Serve {
        /// Node identifier (overrides config)
        #[arg(long, env = "COMANDA__NODE_ID")]
        node_id: Option<String>,

        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// HTTP port (overrides config)
        #[arg(long, env = "COMANDA__API__HTTP_PORT")]
        http_port: Option<u16>,
    },

    /// Print loyalty progress for a lifetime points total
    Progress {
        #[arg(allow_negative_numbers = true)]
        lifetime_points: i64,
    },

    /// Print the delivery fee for a route distance in kilometres
    Quote {
        #[arg(allow_negative_numbers = true)]
        distance_km: f64,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    load_config_with_env(cli, None)
}

/// A config that fails to load is fatal: defaulting would quote the wrong rate.
fn load_config_with_env(
    cli: &Cli,
    env: Option<config::Map<String, String>>,
) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_with_env(Some(path.as_path()), env)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load_with_env(None, env).context("loading config from environment")?,
    };

    if let Some(path) = &cli.settings {
        let rows = SettingsRow::read_json(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = StoreSettings::from_rows(&rows)?;
        info!(rows = rows.len(), applied = !settings.is_empty(), "Store settings loaded");
        config.apply_settings(settings);
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so one-shot commands keep stdout for JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    let loyalty = Arc::new(LoyaltyEngine::new(&config.loyalty)?);
    let delivery = Arc::new(DeliveryPricer::new(&config.delivery)?);

    match cli.command {
        Some(Commands::Progress { lifetime_points }) => {
            let progress = loyalty.progress(lifetime_points)?;
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        Some(Commands::Quote { distance_km }) => {
            let quote = delivery.quote(distance_km)?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Some(Commands::Serve {
            node_id,
            host,
            http_port,
        }) => {
            if let Some(node_id) = node_id {
                config.node_id = node_id;
            }
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = http_port {
                config.api.http_port = port;
            }
            serve(config, loyalty, delivery).await?;
        }
        None => serve(config, loyalty, delivery).await?,
    }

    Ok(())
}

async fn serve(
    config: AppConfig,
    loyalty: Arc<LoyaltyEngine>,
    delivery: Arc<DeliveryPricer>,
) -> anyhow::Result<()> {
    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        "Comanda starting up"
    );

    let api_server = ApiServer::new(config, loyalty, delivery);

    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    api_server.start_http().await
}
