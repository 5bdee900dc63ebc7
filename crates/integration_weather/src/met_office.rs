//! Met Office DataHub site-specific forecast client
//!
//! Client for the DataHub point forecast API
//! (<https://datahub.metoffice.gov.uk/docs/f/category/site-specific/overview>).
//! Every request is authenticated with the `apikey` header.

use async_trait::async_trait;
use domain::{ForecastKind, GeoLocation, ProviderId};
use reqwest::{Client, header::HeaderValue};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    ApiKey, ForecastClient, ForecastPeriod, ForecastRecord, MetOfficeConfig, WeatherError,
    describe_weather_code, http::fetch_json, models::parse_timestamp,
};

/// DataHub response structures
mod api {
    use serde::{Deserialize, Deserializer};

    #[derive(Debug, Deserialize)]
    pub struct FeatureCollection<T> {
        #[serde(default = "Vec::new")]
        pub features: Vec<Feature<T>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Feature<T> {
        pub geometry: Option<Geometry>,
        pub properties: Properties<T>,
    }

    /// GeoJSON point, `[lon, lat, alt]`
    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        #[serde(default)]
        pub coordinates: Vec<f64>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Properties<T> {
        pub location: Option<Location>,
        pub request_point_distance: Option<f64>,
        pub model_run_date: Option<String>,
        #[serde(default = "Vec::new")]
        pub time_series: Vec<T>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Location {
        pub name: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HourlyEntry {
        pub time: String,
        pub screen_temperature: Option<f64>,
        pub feels_like_temperature: Option<f64>,
        pub screen_relative_humidity: Option<f64>,
        pub wind_speed10m: Option<f64>,
        pub wind_gust_speed10m: Option<f64>,
        pub wind_direction_from10m: Option<f64>,
        #[serde(default, deserialize_with = "weather_code")]
        pub significant_weather_code: Option<i32>,
        pub precipitation_rate: Option<f64>,
        pub prob_of_precipitation: Option<f64>,
        pub visibility: Option<f64>,
        pub uv_index: Option<f64>,
        pub mslp: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DailyEntry {
        pub time: String,
        pub day_max_screen_temperature: Option<f64>,
        pub night_min_screen_temperature: Option<f64>,
        pub day_max_feels_like_temp: Option<f64>,
        pub night_min_feels_like_temp: Option<f64>,
        pub day_probability_of_precipitation: Option<f64>,
        pub night_probability_of_precipitation: Option<f64>,
        pub max_uv_index: Option<f64>,
        pub midday_relative_humidity: Option<f64>,
        pub midday_visibility: Option<f64>,
        pub midday_mslp: Option<f64>,
        #[serde(rename = "midday10MWindSpeed")]
        pub midday_wind_speed: Option<f64>,
        #[serde(rename = "midday10MWindDirection")]
        pub midday_wind_direction: Option<f64>,
        #[serde(rename = "midday10MWindGust")]
        pub midday_wind_gust: Option<f64>,
        #[serde(default, deserialize_with = "weather_code")]
        pub day_significant_weather_code: Option<i32>,
        #[serde(default, deserialize_with = "weather_code")]
        pub night_significant_weather_code: Option<i32>,
    }

    /// Weather codes arrive as integers, or the string "NA" when unknown
    fn weather_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Code {
            Number(i32),
            Text(String),
        }

        Ok(match Option::<Code>::deserialize(deserializer)? {
            Some(Code::Number(n)) => Some(n),
            Some(Code::Text(s)) => s.trim().parse().ok(),
            None => None,
        })
    }
}

/// Met Office DataHub forecast client
#[derive(Debug)]
pub struct MetOfficeClient {
    client: Client,
    api_key: Option<ApiKey>,
    base_url: String,
    timeout_secs: u64,
    data_source: String,
    include_location_name: bool,
}

impl MetOfficeClient {
    /// Create a new Met Office client
    ///
    /// A client without a key can be constructed; every forecast request
    /// then fails with `WeatherError::Configuration` without touching the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: MetOfficeConfig, api_key: Option<ApiKey>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            data_source: config.data_source,
            include_location_name: config.include_location_name,
        })
    }

    /// Whether an API key was loaded
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the endpoint URL for a forecast resolution
    fn forecast_url(&self, kind: ForecastKind) -> String {
        format!("{}/{}", self.base_url, kind.as_str())
    }

    /// Query parameters for a point request
    fn query_params(&self, location: &GeoLocation) -> [(&'static str, String); 4] {
        [
            ("dataSource", self.data_source.clone()),
            ("latitude", location.latitude().to_string()),
            ("longitude", location.longitude().to_string()),
            ("includeLocationName", self.include_location_name.to_string()),
        ]
    }

    /// Header value for the API key, kept out of debug output
    fn api_key_header(&self) -> Result<HeaderValue, WeatherError> {
        let key = self.api_key.as_ref().ok_or_else(|| {
            warn!("Met Office forecast requested without an API key");
            WeatherError::Configuration("Met Office API key is not loaded".to_string())
        })?;

        let mut value = HeaderValue::from_str(key.expose()).map_err(|_| {
            WeatherError::Configuration("Met Office API key is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Fetch and decode one DataHub response
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        location: &GeoLocation,
        kind: ForecastKind,
    ) -> Result<api::FeatureCollection<T>, WeatherError> {
        let api_key = self.api_key_header()?;
        let url = self.forecast_url(kind);
        debug!(url = %url, "Sending Met Office request");

        let request = self
            .client
            .get(&url)
            .query(&self.query_params(location))
            .header("accept", "application/json")
            .header("apikey", api_key);

        fetch_json(request, self.timeout_secs)
            .await
            .map_err(|e| match e {
                WeatherError::UpstreamStatus {
                    status: status @ (401 | 403),
                    ..
                } => WeatherError::AuthenticationFailed(format!(
                    "Met Office rejected the API key (HTTP {status})"
                )),
                other => other,
            })
    }

    /// Convert a feature collection into a record using `convert` per entry
    fn convert_collection<T>(
        collection: api::FeatureCollection<T>,
        location: GeoLocation,
        kind: ForecastKind,
        convert: fn(T) -> Result<ForecastPeriod, WeatherError>,
    ) -> Result<ForecastRecord, WeatherError> {
        let feature = collection.features.into_iter().next().ok_or_else(|| {
            WeatherError::ParseError("Response contained no features".to_string())
        })?;

        let site_location = feature.geometry.as_ref().and_then(site_location);
        let properties = feature.properties;
        if let Some(site) = &site_location {
            debug!(
                site = %site,
                distance_m = properties.request_point_distance,
                "Resolved DataHub site"
            );
        }

        let periods = properties
            .time_series
            .into_iter()
            .map(convert)
            .collect::<Result<Vec<_>, _>>()?;

        if periods.is_empty() {
            return Err(WeatherError::ParseError(
                "Response contained an empty time series".to_string(),
            ));
        }

        Ok(ForecastRecord {
            provider: ProviderId::MetOffice,
            kind,
            location,
            location_name: properties.location.and_then(|l| l.name),
            site_location,
            site_distance_m: properties.request_point_distance,
            generated_at: properties
                .model_run_date
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            periods,
        })
    }

    fn convert_hourly(entry: api::HourlyEntry) -> Result<ForecastPeriod, WeatherError> {
        let mut period = ForecastPeriod::starting_at(parse_timestamp(&entry.time)?);
        period.temperature = entry.screen_temperature;
        period.feels_like = entry.feels_like_temperature;
        period.relative_humidity = entry.screen_relative_humidity;
        period.wind_speed = entry.wind_speed10m;
        period.wind_gust = entry.wind_gust_speed10m;
        period.wind_direction = entry.wind_direction_from10m;
        period.precipitation_rate = entry.precipitation_rate;
        period.precipitation_probability = entry.prob_of_precipitation;
        period.visibility = entry.visibility;
        period.uv_index = entry.uv_index;
        period.pressure = entry.mslp;
        period.weather_code = entry.significant_weather_code;
        period.summary = entry
            .significant_weather_code
            .map(|code| describe_weather_code(Some(code)));
        Ok(period)
    }

    fn convert_daily(entry: api::DailyEntry) -> Result<ForecastPeriod, WeatherError> {
        let mut period = ForecastPeriod::starting_at(parse_timestamp(&entry.time)?);
        period.temperature = entry.day_max_screen_temperature;
        period.temperature_min = entry.night_min_screen_temperature;
        period.feels_like = entry.day_max_feels_like_temp;
        period.feels_like_min = entry.night_min_feels_like_temp;
        period.precipitation_probability = entry.day_probability_of_precipitation;
        period.precipitation_probability_night = entry.night_probability_of_precipitation;
        period.uv_index = entry.max_uv_index;
        period.relative_humidity = entry.midday_relative_humidity;
        period.visibility = entry.midday_visibility;
        period.pressure = entry.midday_mslp;
        period.wind_speed = entry.midday_wind_speed;
        period.wind_direction = entry.midday_wind_direction;
        period.wind_gust = entry.midday_wind_gust;
        period.weather_code = entry.day_significant_weather_code;
        period.night_weather_code = entry.night_significant_weather_code;
        period.summary = entry
            .day_significant_weather_code
            .map(|code| describe_weather_code(Some(code)));
        Ok(period)
    }
}

/// Site position from a GeoJSON `[lon, lat, alt]` point
fn site_location(geometry: &api::Geometry) -> Option<GeoLocation> {
    match geometry.coordinates.as_slice() {
        [lon, lat, ..] => GeoLocation::new(*lat, *lon)
            .inspect_err(|e| warn!(error = %e, "DataHub returned an invalid site position"))
            .ok(),
        _ => None,
    }
}

#[async_trait]
impl ForecastClient for MetOfficeClient {
    fn provider(&self) -> ProviderId {
        ProviderId::MetOffice
    }

    #[instrument(skip(self), fields(provider = "met-office", location = %location))]
    async fn get_forecast(
        &self,
        location: GeoLocation,
        kind: ForecastKind,
    ) -> Result<ForecastRecord, WeatherError> {
        let record = match kind {
            ForecastKind::Hourly => {
                let collection = self.fetch(&location, kind).await?;
                Self::convert_collection(collection, location, kind, Self::convert_hourly)?
            },
            ForecastKind::Daily => {
                let collection = self.fetch(&location, kind).await?;
                Self::convert_collection(collection, location, kind, Self::convert_daily)?
            },
        };

        debug!(
            periods = record.periods.len(),
            location_name = ?record.location_name,
            "Met Office forecast completed"
        );
        Ok(record)
    }

    /// Ready when a key is loaded; probing the API would spend quota
    async fn is_healthy(&self) -> bool {
        self.has_credential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<ApiKey>) -> MetOfficeClient {
        MetOfficeClient::new(MetOfficeConfig::default(), api_key).unwrap()
    }

    #[test]
    fn test_forecast_url() {
        let client = client(None);
        assert_eq!(
            client.forecast_url(ForecastKind::Hourly),
            "https://data.hub.api.metoffice.gov.uk/sitespecific/v0/point/hourly"
        );
        assert!(client.forecast_url(ForecastKind::Daily).ends_with("/point/daily"));
    }

    #[test]
    fn test_query_params() {
        let client = client(None);
        let location = GeoLocation::new(51.5074, -0.1278).unwrap();
        let params = client.query_params(&location);

        assert_eq!(params[0], ("dataSource", "BD1".to_string()));
        assert_eq!(params[1], ("latitude", "51.5074".to_string()));
        assert_eq!(params[2], ("longitude", "-0.1278".to_string()));
        assert_eq!(params[3], ("includeLocationName", "true".to_string()));
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let client = client(None);
        assert!(!client.has_credential());
        assert!(matches!(
            client.api_key_header(),
            Err(WeatherError::Configuration(_))
        ));
    }

    #[test]
    fn test_api_key_header_is_sensitive() {
        let client = client(Some(ApiKey::new("abc").unwrap()));
        let header = client.api_key_header().unwrap();
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "abc");
    }

    #[test]
    fn test_weather_code_accepts_na() {
        let entry: api::HourlyEntry = serde_json::from_str(
            r#"{"time": "2025-06-01T12:00Z", "significantWeatherCode": "NA"}"#,
        )
        .unwrap();
        assert!(entry.significant_weather_code.is_none());

        let entry: api::HourlyEntry =
            serde_json::from_str(r#"{"time": "2025-06-01T12:00Z", "significantWeatherCode": 7}"#)
                .unwrap();
        assert_eq!(entry.significant_weather_code, Some(7));
    }

    #[test]
    fn test_convert_daily_entry() {
        let entry: api::DailyEntry = serde_json::from_str(
            r#"{
                "time": "2025-06-01T00:00Z",
                "dayMaxScreenTemperature": 21.4,
                "nightMinScreenTemperature": 11.2,
                "midday10MWindSpeed": 4.5,
                "midday10MWindDirection": 240,
                "daySignificantWeatherCode": 3,
                "nightSignificantWeatherCode": 0
            }"#,
        )
        .unwrap();

        let period = MetOfficeClient::convert_daily(entry).unwrap();
        assert_eq!(period.temperature, Some(21.4));
        assert_eq!(period.temperature_min, Some(11.2));
        assert_eq!(period.wind_speed, Some(4.5));
        assert_eq!(period.wind_direction, Some(240.0));
        assert_eq!(period.weather_code, Some(3));
        assert_eq!(period.night_weather_code, Some(0));
        assert_eq!(period.summary.as_deref(), Some("Partly cloudy (day)"));
        assert!(period.uv_index.is_none());
    }

    #[test]
    fn test_site_location_reads_lon_lat_order() {
        let geometry = api::Geometry {
            coordinates: vec![-0.1278, 51.5074, 11.0],
        };
        let site = site_location(&geometry).unwrap();
        assert!((site.latitude() - 51.5074).abs() < f64::EPSILON);
        assert!((site.longitude() + 0.1278).abs() < f64::EPSILON);

        let short = api::Geometry { coordinates: vec![1.0] };
        assert!(site_location(&short).is_none());

        let swapped = api::Geometry {
            coordinates: vec![0.0, 120.0],
        };
        assert!(site_location(&swapped).is_none());
    }

    #[test]
    fn test_convert_without_features_is_parse_error() {
        let collection: api::FeatureCollection<api::HourlyEntry> =
            serde_json::from_str(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        let location = GeoLocation::new(51.5, -0.12).unwrap();

        let err = MetOfficeClient::convert_collection(
            collection,
            location,
            ForecastKind::Hourly,
            MetOfficeClient::convert_hourly,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(_)));
    }

    #[test]
    fn test_convert_empty_time_series_is_parse_error() {
        let collection: api::FeatureCollection<api::DailyEntry> = serde_json::from_str(
            r#"{"features": [{"properties": {"timeSeries": []}}]}"#,
        )
        .unwrap();
        let location = GeoLocation::new(51.5, -0.12).unwrap();

        let err = MetOfficeClient::convert_collection(
            collection,
            location,
            ForecastKind::Daily,
            MetOfficeClient::convert_daily,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(_)));
    }
}
