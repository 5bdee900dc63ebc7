//! Forecast provider trait

use async_trait::async_trait;
use domain::{ForecastKind, GeoLocation, ProviderId};

use crate::{ForecastRecord, WeatherError};

/// Common interface for forecast providers
///
/// Each call is a single, independent request/response cycle. Implementations
/// perform no retries and keep no per-call state.
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Which provider this client talks to
    fn provider(&self) -> ProviderId;

    /// Fetch a forecast for `location` at the given resolution
    ///
    /// On success the record holds at least one period. Failures never
    /// yield a partially populated record.
    async fn get_forecast(
        &self,
        location: GeoLocation,
        kind: ForecastKind,
    ) -> Result<ForecastRecord, WeatherError>;

    /// Whether the client is usable and the provider answers
    async fn is_healthy(&self) -> bool;
}
