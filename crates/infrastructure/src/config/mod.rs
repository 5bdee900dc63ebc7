//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `providers`: Met Office credential location
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, then `FORECASTER_*` environment variables using `__` between
//! nesting levels (e.g. `FORECASTER_MET_OFFICE__API_KEY_FILE`).

mod providers;
mod server;

use std::path::Path;

use integration_weather::NwsConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use providers::MetOfficeAppConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FORECASTER";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// National Weather Service client
    #[serde(default)]
    pub nws: NwsConfig,

    /// Met Office DataHub client and credential
    #[serde(default)]
    pub met_office: MetOfficeAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(None, Self::environment())
    }

    /// Load configuration from an explicit file and the environment
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    pub fn load_from_path(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(Some(path), Self::environment())
    }

    /// Environment source with the application prefix
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    fn load_with(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(
            server = %app.server.bind_address(),
            met_office_key_file = %app.met_office.api_key_file.display(),
            "Configuration loaded"
        );
        Ok(app)
    }
}
