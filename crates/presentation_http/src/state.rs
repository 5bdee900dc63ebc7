//! Application state shared across handlers

use std::sync::Arc;

use infrastructure::ForecastProviders;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Forecast clients, selected per request by provider
    pub providers: Arc<ForecastProviders>,
}

impl AppState {
    /// Wrap a provider registry
    #[must_use]
    pub fn new(providers: ForecastProviders) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}
