//! Infrastructure adapters
//!
//! Adapters connect the forecast clients to configuration.

mod forecast_providers;

pub use forecast_providers::{ForecastProviders, ProviderStatus, load_api_key};
