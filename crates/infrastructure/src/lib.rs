//! Infrastructure layer - Configuration, telemetry and provider wiring
//!
//! Loads [`AppConfig`], installs the tracing subscriber and builds the
//! [`ForecastProviders`] registry the presentation crates serve from.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::{ForecastProviders, ProviderStatus, load_api_key};
pub use config::{AppConfig, MetOfficeAppConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
