//! Forecaster CLI
//!
//! One-shot forecast lookups and server health checks from the command line.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use domain::{ForecastKind, GeoLocation, ProviderId};
use infrastructure::{AppConfig, ForecastProviders};
use integration_weather::report;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Forecaster CLI
#[derive(Parser)]
#[command(name = "forecaster-cli")]
#[command(author, version, about = "Weather forecast client for NWS and the Met Office", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a forecast directly from a provider
    ///
    /// Example: forecaster-cli forecast --provider met-office --kind daily --latitude 51.5 --longitude -0.12
    Forecast {
        /// Provider to query (nws, met-office)
        #[arg(short, long)]
        provider: ProviderId,

        /// Forecast resolution (hourly, daily)
        #[arg(short, long, default_value = "daily")]
        kind: ForecastKind,

        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,

        /// Print the normalized record as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Configuration file (defaults to config.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check whether a running forecaster server is alive
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Forecast {
            provider,
            kind,
            latitude,
            longitude,
            json,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let location = GeoLocation::new(latitude, longitude)?;
            let providers = ForecastProviders::from_config(&config)?;

            debug!(%provider, %kind, %location, "Requesting forecast");
            let record = providers.get_forecast(provider, location, kind).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", report::render(&record));
            }
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(&url, "/health")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("Healthy");
                    std::process::exit(0);
                },
                Ok(resp) => {
                    println!("Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
