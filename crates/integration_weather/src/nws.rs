//! National Weather Service client
//!
//! Client for the keyless NWS API (<https://www.weather.gov/documentation/services-web-api>).
//! A forecast takes two requests: `/points/{lat},{lon}` resolves the grid
//! forecast URLs for a coordinate, which is then fetched with SI units.

use async_trait::async_trait;
use domain::{ForecastKind, GeoLocation, ProviderId};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    ForecastClient, ForecastPeriod, ForecastRecord, NwsConfig, WeatherError, http::fetch_json,
    models::parse_timestamp,
};

/// NWS API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct PointResponse {
        pub properties: PointProperties,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PointProperties {
        pub forecast: Option<String>,
        pub forecast_hourly: Option<String>,
        pub relative_location: Option<RelativeLocation>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RelativeLocation {
        pub properties: RelativeLocationProperties,
    }

    #[derive(Debug, Deserialize)]
    pub struct RelativeLocationProperties {
        pub city: Option<String>,
        pub state: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub properties: ForecastProperties,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ForecastProperties {
        pub generated_at: Option<String>,
        pub updated: Option<String>,
        #[serde(default)]
        pub periods: Vec<Period>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Period {
        pub name: Option<String>,
        pub start_time: String,
        pub end_time: Option<String>,
        pub is_daytime: Option<bool>,
        pub temperature: Option<Measure>,
        pub temperature_unit: Option<String>,
        pub probability_of_precipitation: Option<Quantity>,
        pub relative_humidity: Option<Quantity>,
        pub wind_speed: Option<String>,
        pub wind_gust: Option<String>,
        pub wind_direction: Option<String>,
        pub short_forecast: Option<String>,
        pub detailed_forecast: Option<String>,
    }

    /// Temperature is a bare number, or a quantity object when the
    /// quantitative-values feature flag is active
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Measure {
        Value(f64),
        Quantity(Quantity),
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Quantity {
        pub unit_code: Option<String>,
        pub value: Option<f64>,
    }
}

/// 16-point compass, clockwise from north
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// National Weather Service forecast client
#[derive(Debug)]
pub struct NwsClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl NwsClient {
    /// Create a new NWS client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: NwsConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Build the points lookup URL for a location
    fn points_url(&self, location: &GeoLocation) -> String {
        format!("{}/points/{}", self.base_url, location.to_point_key())
    }

    /// Resolve the grid metadata for a location
    async fn resolve_point(
        &self,
        location: &GeoLocation,
    ) -> Result<api::PointProperties, WeatherError> {
        let url = self.points_url(location);
        debug!(url = %url, "Resolving NWS grid point");

        let request = self
            .client
            .get(&url)
            .header("Accept", "application/geo+json");

        match fetch_json::<api::PointResponse>(request, self.timeout_secs).await {
            Ok(point) => Ok(point.properties),
            Err(WeatherError::UpstreamStatus { status: 404, .. }) => {
                Err(WeatherError::LocationNotCovered(location.to_string()))
            },
            Err(e) => Err(e),
        }
    }

    /// Pick the forecast URL for the requested resolution
    fn forecast_url(point: &api::PointProperties, kind: ForecastKind) -> Result<&str, WeatherError> {
        let url = match kind {
            ForecastKind::Hourly => point.forecast_hourly.as_deref(),
            ForecastKind::Daily => point.forecast.as_deref(),
        };
        url.ok_or_else(|| {
            WeatherError::ParseError(format!("Points response has no {kind} forecast URL"))
        })
    }

    /// "City, ST" from the relative location, when present
    fn location_name(point: &api::PointProperties) -> Option<String> {
        let props = &point.relative_location.as_ref()?.properties;
        match (props.city.as_deref(), props.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(state)) => Some(state.to_string()),
            (None, None) => None,
        }
    }

    /// Convert a forecast response into a record
    fn convert_forecast(
        response: api::ForecastResponse,
        location: GeoLocation,
        kind: ForecastKind,
        location_name: Option<String>,
    ) -> Result<ForecastRecord, WeatherError> {
        let properties = response.properties;

        let periods = properties
            .periods
            .into_iter()
            .map(Self::convert_period)
            .collect::<Result<Vec<_>, _>>()?;

        if periods.is_empty() {
            return Err(WeatherError::ParseError(
                "Forecast contained no periods".to_string(),
            ));
        }

        let generated_at = properties
            .generated_at
            .or(properties.updated)
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(ForecastRecord {
            provider: ProviderId::Nws,
            kind,
            location,
            location_name,
            site_location: None,
            site_distance_m: None,
            generated_at,
            periods,
        })
    }

    fn convert_period(period: api::Period) -> Result<ForecastPeriod, WeatherError> {
        let mut out = ForecastPeriod::starting_at(parse_timestamp(&period.start_time)?);
        out.end = period.end_time.as_deref().map(parse_timestamp).transpose()?;
        out.name = period.name.filter(|n| !n.is_empty());
        out.is_daytime = period.is_daytime;
        out.temperature = period
            .temperature
            .and_then(|t| to_celsius(t, period.temperature_unit.as_deref()));
        out.precipitation_probability = period.probability_of_precipitation.and_then(|q| q.value);
        out.relative_humidity = period.relative_humidity.and_then(|q| q.value);
        out.wind_speed = period.wind_speed.as_deref().and_then(parse_wind_speed);
        out.wind_gust = period.wind_gust.as_deref().and_then(parse_wind_speed);
        out.wind_direction = period.wind_direction.as_deref().and_then(cardinal_to_degrees);
        out.summary = period.short_forecast.filter(|s| !s.is_empty());
        out.detailed_forecast = period.detailed_forecast.filter(|s| !s.is_empty());
        Ok(out)
    }
}

/// Normalize a temperature to Celsius
fn to_celsius(measure: api::Measure, unit: Option<&str>) -> Option<f64> {
    let (value, fahrenheit) = match measure {
        api::Measure::Value(v) => (v, unit.is_some_and(|u| u.eq_ignore_ascii_case("F"))),
        api::Measure::Quantity(q) => (
            q.value?,
            q.unit_code.as_deref().is_some_and(|u| u.ends_with("degF")),
        ),
    };
    Some(if fahrenheit {
        (value - 32.0) * 5.0 / 9.0
    } else {
        value
    })
}

/// Parse an NWS wind string ("15 km/h", "10 to 20 mph") into m/s
///
/// Ranges resolve to their upper bound.
fn parse_wind_speed(raw: &str) -> Option<f64> {
    let mut tokens = raw.split_whitespace();
    let unit = tokens.next_back()?;
    let upper = tokens.filter_map(|t| t.parse::<f64>().ok()).next_back()?;

    let factor = match unit.to_ascii_lowercase().as_str() {
        "km/h" | "kph" => 1.0 / 3.6,
        "mph" => 0.447_04,
        "kt" | "kts" | "knots" => 0.514_444,
        "m/s" => 1.0,
        other => {
            warn!(unit = other, "Unrecognized NWS wind speed unit");
            return None;
        },
    };
    Some(upper * factor)
}

/// Convert a 16-point compass direction into degrees
fn cardinal_to_degrees(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    COMPASS_POINTS
        .iter()
        .position(|p| p.eq_ignore_ascii_case(raw))
        .map(|idx| {
            #[allow(clippy::cast_precision_loss)]
            let idx = idx as f64;
            idx * 22.5
        })
}

#[async_trait]
impl ForecastClient for NwsClient {
    fn provider(&self) -> ProviderId {
        ProviderId::Nws
    }

    #[instrument(skip(self), fields(provider = "nws", location = %location))]
    async fn get_forecast(
        &self,
        location: GeoLocation,
        kind: ForecastKind,
    ) -> Result<ForecastRecord, WeatherError> {
        let point = self.resolve_point(&location).await?;
        let url = Self::forecast_url(&point, kind)?;
        debug!(url = %url, "Fetching NWS forecast");

        let request = self
            .client
            .get(url)
            .query(&[("units", "si")])
            .header("Accept", "application/geo+json");
        let response: api::ForecastResponse = fetch_json(request, self.timeout_secs).await?;

        let record =
            Self::convert_forecast(response, location, kind, Self::location_name(&point))?;
        debug!(periods = record.periods.len(), "NWS forecast completed");
        Ok(record)
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "NWS health check failed");
                false
            },
            Err(e) => {
                warn!(error = %e, "NWS health check failed");
                false
            },
        }
    }
}
