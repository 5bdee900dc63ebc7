//! Normalized forecast models
//!
//! Every provider response is mapped into these types. Measurements keep the
//! provider's SI units (°C, m/s, Pa, m) without rounding; presentation-unit
//! conversions live in [`crate::report`].

use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{ForecastKind, GeoLocation, ProviderId};
use serde::{Deserialize, Serialize};

use crate::WeatherError;

/// A single time-stamped prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    /// Period start (UTC)
    pub start: DateTime<Utc>,
    /// Period end (UTC), when the provider states it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Provider label such as "Tonight" or "Wednesday"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the period is during daylight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_daytime: Option<bool>,

    /// Air temperature in Celsius (daily: the daytime maximum)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Night-time minimum temperature in Celsius (daily only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<f64>,
    /// Feels-like temperature in Celsius (daily: the daytime maximum)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    /// Night-time minimum feels-like temperature in Celsius (daily only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like_min: Option<f64>,
    /// Relative humidity percentage (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<f64>,

    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Wind gust speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    /// Direction the wind blows from, degrees (0-360, 0 = North)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,

    /// Probability of precipitation in percent (daily: daytime)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
    /// Night-time probability of precipitation in percent (daily only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability_night: Option<f64>,
    /// Precipitation rate in mm/h
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_rate: Option<f64>,

    /// Mean sea level pressure in Pa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Visibility in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// UV index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,

    /// Met Office significant weather code (daily: daytime)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<i32>,
    /// Met Office night-time significant weather code (daily only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_weather_code: Option<i32>,
    /// Short human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long-form narrative, when the provider writes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_forecast: Option<String>,
}

impl ForecastPeriod {
    /// Create an empty period starting at `start`
    #[must_use]
    pub const fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: None,
            name: None,
            is_daytime: None,
            temperature: None,
            temperature_min: None,
            feels_like: None,
            feels_like_min: None,
            relative_humidity: None,
            wind_speed: None,
            wind_gust: None,
            wind_direction: None,
            precipitation_probability: None,
            precipitation_probability_night: None,
            precipitation_rate: None,
            pressure: None,
            visibility: None,
            uv_index: None,
            weather_code: None,
            night_weather_code: None,
            summary: None,
            detailed_forecast: None,
        }
    }
}

/// Normalized result of one forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Provider that produced the forecast
    pub provider: ProviderId,
    /// Requested resolution
    pub kind: ForecastKind,
    /// Requested point
    pub location: GeoLocation,
    /// Place name resolved by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Forecast site the provider snapped the requested point to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_location: Option<GeoLocation>,
    /// Distance in meters from the requested point to `site_location`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_distance_m: Option<f64>,
    /// Model run or generation time reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    /// Time-ordered predictions, never empty
    pub periods: Vec<ForecastPeriod>,
}

/// Parse an upstream timestamp into UTC
///
/// Accepts RFC 3339 (`2025-06-01T06:00:00-05:00`) and the minute-precision
/// Zulu form the DataHub emits (`2025-06-01T12:00Z`).
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, WeatherError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%MZ")
        .map(|naive| naive.and_utc())
        .map_err(|e| WeatherError::ParseError(format!("Invalid timestamp '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp("2025-06-01T06:00:00-05:00").expect("valid");
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap());
    }

    #[test]
    fn parses_minute_precision_zulu() {
        let dt = parse_timestamp("2025-06-01T12:00Z").expect("valid");
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(_)));
    }

    fn sample_record() -> ForecastRecord {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid date");
        let mut first = ForecastPeriod::starting_at(start);
        first.temperature = Some(18.5);
        let second = ForecastPeriod::starting_at(start + chrono::Duration::hours(1));

        ForecastRecord {
            provider: ProviderId::MetOffice,
            kind: ForecastKind::Hourly,
            location: GeoLocation::new(51.5, -0.12).expect("valid"),
            location_name: Some("London".to_string()),
            site_location: None,
            site_distance_m: None,
            generated_at: None,
            periods: vec![first, second],
        }
    }

    #[test]
    fn serialization_skips_missing_measurements() {
        let record = sample_record();
        let json = serde_json::to_value(&record).expect("serialize");

        assert_eq!(json["provider"], "met-office");
        assert_eq!(json["kind"], "hourly");
        assert_eq!(json["periods"][0]["temperature"], 18.5);
        assert!(json["periods"][0].get("wind_speed").is_none());
        assert!(json.get("generated_at").is_none());
        assert!(json.get("site_location").is_none());
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let record = sample_record();
        let json = serde_json::to_string(&record).expect("serialize");
        let parsed: ForecastRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, record);
    }
}
