//! Forecast provider registry - Selects a `ForecastClient` by `ProviderId`

use std::{collections::HashMap, sync::Arc};

use domain::{ForecastKind, GeoLocation, ProviderId};
use integration_weather::{
    ApiKey, ForecastClient, ForecastRecord, MetOfficeClient, NwsClient, WeatherError,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{AppConfig, MetOfficeAppConfig};

/// Readiness of one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    /// Provider identifier
    pub provider: ProviderId,
    /// Human-readable provider name
    pub name: &'static str,
    /// A client is registered for the provider
    pub configured: bool,
    /// The client reports itself usable
    pub healthy: bool,
}

/// The set of forecast clients built at startup
///
/// Clients are shared read-only; the registry itself holds no mutable state.
#[derive(Clone, Default)]
pub struct ForecastProviders {
    clients: HashMap<ProviderId, Arc<dyn ForecastClient>>,
}

impl std::fmt::Debug for ForecastProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<_> = self.clients.keys().map(ProviderId::config_key).collect();
        providers.sort_unstable();
        f.debug_struct("ForecastProviders")
            .field("providers", &providers)
            .finish()
    }
}

impl ForecastProviders {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both provider clients from configuration
    ///
    /// A missing Met Office key is not an error here: the client is still
    /// registered and fails each request with `WeatherError::Configuration`.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to initialize.
    pub fn from_config(config: &AppConfig) -> Result<Self, WeatherError> {
        let nws = NwsClient::new(config.nws.clone())?;
        let met_office = MetOfficeClient::new(
            config.met_office.client.clone(),
            load_api_key(&config.met_office),
        )?;

        Ok(Self::new()
            .with_client(Arc::new(nws))
            .with_client(Arc::new(met_office)))
    }

    /// Register a client under the provider it reports
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn ForecastClient>) -> Self {
        let provider = client.provider();
        debug!(provider = %provider, "Registered forecast provider");
        self.clients.insert(provider, client);
        self
    }

    /// Client for a provider, if registered
    pub fn get(&self, provider: ProviderId) -> Option<Arc<dyn ForecastClient>> {
        self.clients.get(&provider).cloned()
    }

    /// Fetch a forecast from the selected provider
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Configuration` if no client is registered for
    /// `provider`, otherwise whatever the client returns.
    #[instrument(skip(self), fields(provider = %provider, location = %location, kind = %kind))]
    pub async fn get_forecast(
        &self,
        provider: ProviderId,
        location: GeoLocation,
        kind: ForecastKind,
    ) -> Result<ForecastRecord, WeatherError> {
        let client = self.get(provider).ok_or_else(|| {
            WeatherError::Configuration(format!(
                "{} is not configured",
                provider.display_name()
            ))
        })?;

        let result = client.get_forecast(location, kind).await;
        match &result {
            Ok(record) => debug!(periods = record.periods.len(), "Retrieved forecast"),
            Err(e) => debug!(error = %e, kind = ?e.kind(), "Failed to get forecast"),
        }
        result
    }

    /// Readiness of every known provider, in `ProviderId::ALL` order
    pub async fn readiness(&self) -> Vec<ProviderStatus> {
        let mut statuses = Vec::with_capacity(ProviderId::ALL.len());
        for provider in ProviderId::ALL {
            let (configured, healthy) = match self.get(provider) {
                Some(client) => (true, client.is_healthy().await),
                None => (false, false),
            };
            statuses.push(ProviderStatus {
                provider,
                name: provider.display_name(),
                configured,
                healthy,
            });
        }
        statuses
    }
}

/// Load the Met Office key from the configured file, then the environment
///
/// Returns `None` (and logs a warning) when neither source yields a key.
pub fn load_api_key(config: &MetOfficeAppConfig) -> Option<ApiKey> {
    match ApiKey::from_file(&config.api_key_file) {
        Ok(key) => {
            info!(path = %config.api_key_file.display(), "Loaded Met Office API key");
            Some(key)
        },
        Err(file_error) => match ApiKey::from_env(&config.api_key_env) {
            Ok(key) => {
                info!(env_var = %config.api_key_env, "Loaded Met Office API key from environment");
                Some(key)
            },
            Err(_) => {
                warn!(
                    error = %file_error,
                    env_var = %config.api_key_env,
                    "No Met Office API key available, Met Office forecasts are disabled"
                );
                None
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::Utc;
    use integration_weather::ForecastPeriod;
    use mockall::mock;

    use super::*;

    mock! {
        pub Client {}

        #[async_trait::async_trait]
        impl ForecastClient for Client {
            fn provider(&self) -> ProviderId;
            async fn get_forecast(&self, location: GeoLocation, kind: ForecastKind) -> Result<ForecastRecord, WeatherError>;
            async fn is_healthy(&self) -> bool;
        }
    }

    fn mock_client(provider: ProviderId) -> MockClient {
        let mut mock = MockClient::new();
        mock.expect_provider().return_const(provider);
        mock
    }

    fn sample_record(provider: ProviderId, location: GeoLocation, kind: ForecastKind) -> ForecastRecord {
        ForecastRecord {
            provider,
            kind,
            location,
            location_name: None,
            site_location: None,
            site_distance_m: None,
            generated_at: None,
            periods: vec![ForecastPeriod::starting_at(Utc::now())],
        }
    }

    fn london() -> GeoLocation {
        GeoLocation::new(51.5074, -0.1278).unwrap()
    }

    fn unset_env_config(file: std::path::PathBuf) -> MetOfficeAppConfig {
        MetOfficeAppConfig {
            api_key_file: file,
            api_key_env: "FORECASTER_TEST_UNSET_MET_OFFICE_KEY_5521".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn dispatches_to_selected_provider() {
        let mut met_office = mock_client(ProviderId::MetOffice);
        met_office
            .expect_get_forecast()
            .times(1)
            .returning(|location, kind| Ok(sample_record(ProviderId::MetOffice, location, kind)));

        let mut nws = mock_client(ProviderId::Nws);
        nws.expect_get_forecast().never();

        let providers = ForecastProviders::new()
            .with_client(Arc::new(nws))
            .with_client(Arc::new(met_office));

        let record = providers
            .get_forecast(ProviderId::MetOffice, london(), ForecastKind::Daily)
            .await
            .unwrap();
        assert_eq!(record.provider, ProviderId::MetOffice);
        assert_eq!(record.kind, ForecastKind::Daily);
    }

    #[tokio::test]
    async fn unregistered_provider_is_configuration_error() {
        let providers = ForecastProviders::new();
        let err = providers
            .get_forecast(ProviderId::Nws, london(), ForecastKind::Hourly)
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(_)));
    }

    #[tokio::test]
    async fn client_errors_pass_through() {
        let mut nws = mock_client(ProviderId::Nws);
        nws.expect_get_forecast()
            .returning(|_, _| Err(WeatherError::LocationNotCovered("51.5°N".to_string())));

        let providers = ForecastProviders::new().with_client(Arc::new(nws));
        let err = providers
            .get_forecast(ProviderId::Nws, london(), ForecastKind::Daily)
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::LocationNotCovered(_)));
    }

    #[tokio::test]
    async fn readiness_lists_every_provider() {
        let mut met_office = mock_client(ProviderId::MetOffice);
        met_office.expect_is_healthy().returning(|| false);

        let providers = ForecastProviders::new().with_client(Arc::new(met_office));
        let statuses = providers.readiness().await;

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].provider, ProviderId::Nws);
        assert!(!statuses[0].configured);
        assert_eq!(statuses[1].provider, ProviderId::MetOffice);
        assert!(statuses[1].configured);
        assert!(!statuses[1].healthy);
    }

    #[test]
    fn debug_lists_provider_keys() {
        let providers = ForecastProviders::new().with_client(Arc::new(mock_client(ProviderId::Nws)));
        let debug = format!("{providers:?}");
        assert!(debug.contains("ForecastProviders"));
        assert!(debug.contains("nws"));
    }

    #[test]
    fn load_api_key_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  key-from-file  ").unwrap();

        let key = load_api_key(&unset_env_config(file.path().to_path_buf()));
        assert!(key.is_some());
    }

    #[test]
    fn load_api_key_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let key = load_api_key(&unset_env_config(dir.path().join("missing.txt")));
        assert!(key.is_none());
    }

    #[tokio::test]
    async fn from_config_registers_both_providers() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.met_office = unset_env_config(dir.path().join("missing.txt"));

        let providers = ForecastProviders::from_config(&config).unwrap();
        assert!(providers.get(ProviderId::Nws).is_some());

        let met_office = providers.get(ProviderId::MetOffice).unwrap();
        assert!(!met_office.is_healthy().await);
    }
}
