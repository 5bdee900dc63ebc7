//! Plain-text forecast reports
//!
//! Renders a [`ForecastRecord`] as a header line followed by one `---`
//! section per period, each a list of `Key: value` lines. Measurements are
//! converted to presentation units here (mph, mb/hPa, km); absent values
//! read `N/A`.

use domain::ForecastKind;

use crate::{ForecastPeriod, ForecastRecord, describe_weather_code};

/// m/s to mph, as used by the hourly report
const MS_TO_MPH_HOURLY: f64 = 2.237;
/// m/s to mph, as used by the daily report
const MS_TO_MPH_DAILY: f64 = 2.236_94;
/// Pa to mb / hPa
const PA_TO_HPA: f64 = 0.01;
/// m to km
const M_TO_KM: f64 = 0.001;

const MISSING: &str = "N/A";

/// Render a forecast record as a text report
#[must_use]
pub fn render(record: &ForecastRecord) -> String {
    let label = record.location_name.clone().unwrap_or_else(|| {
        let point = match record.kind {
            ForecastKind::Hourly => record.site_location.unwrap_or(record.location),
            ForecastKind::Daily => record.location,
        };
        format!("Location: {point}")
    });

    let (header, sections): (String, Vec<String>) = match record.kind {
        ForecastKind::Hourly => (
            format!("Hourly forecast for {label}:"),
            record.periods.iter().map(hourly_section).collect(),
        ),
        ForecastKind::Daily => (
            format!("Daily forecast for {label}:"),
            record.periods.iter().map(daily_section).collect(),
        ),
    };

    let mut out = header;
    for section in sections {
        out.push('\n');
        out.push_str(&section);
    }
    out
}

fn hourly_section(period: &ForecastPeriod) -> String {
    let title = titled(
        format!("Time: {}", period.start.format("%Y-%m-%dT%H:%MZ")),
        period,
    );
    let fields = vec![
        (
            "Temperature",
            format!(
                "{} (feels like {})",
                plain(period.temperature, "°C"),
                plain(period.feels_like, "°C")
            ),
        ),
        ("Weather", weather(period)),
        (
            "Wind",
            format!(
                "{} from {}",
                measure(period.wind_speed, MS_TO_MPH_HOURLY, " mph"),
                plain(period.wind_direction, "°")
            ),
        ),
        ("Humidity", plain(period.relative_humidity, "%")),
        (
            "Precipitation",
            format!(
                "{} ({} chance)",
                plain(period.precipitation_rate, " mm/h"),
                plain(period.precipitation_probability, "%")
            ),
        ),
        ("Pressure", measure(period.pressure, PA_TO_HPA, " mb")),
        ("Visibility", measure(period.visibility, M_TO_KM, " km")),
        ("UV Index", plain(period.uv_index, "")),
    ];
    section(&title, fields, period)
}

fn daily_section(period: &ForecastPeriod) -> String {
    let title = titled(format!("Date: {}", period.start.format("%Y-%m-%d")), period);
    let fields = vec![
        ("Max Temp", measure(period.temperature, 1.0, "°C")),
        ("Min Temp", measure(period.temperature_min, 1.0, "°C")),
        ("Feels Like Max Temp", measure(period.feels_like, 1.0, "°C")),
        (
            "Feels Like Min Temp (Night)",
            measure(period.feels_like_min, 1.0, "°C"),
        ),
        (
            "Day Precipitation Probability",
            measure(period.precipitation_probability, 1.0, "%"),
        ),
        (
            "Night Precipitation Probability",
            measure(period.precipitation_probability_night, 1.0, "%"),
        ),
        ("Max UV Index", measure(period.uv_index, 1.0, "")),
        (
            "Midday Relative Humidity",
            measure(period.relative_humidity, 1.0, "%"),
        ),
        (
            "Midday Visibility",
            measure(period.visibility, M_TO_KM, " km"),
        ),
        (
            "Midday Pressure (MSL)",
            measure(period.pressure, PA_TO_HPA, " hPa"),
        ),
        (
            "Wind Speed (10m)",
            measure(period.wind_speed, MS_TO_MPH_DAILY, " mph"),
        ),
        ("Weather", daily_weather(period)),
    ];
    section(&title, fields, period)
}

/// Append the provider's period name to a section title
fn titled(title: String, period: &ForecastPeriod) -> String {
    match &period.name {
        Some(name) => format!("{title} ({name})"),
        None => title,
    }
}

fn section(title: &str, fields: Vec<(&str, String)>, period: &ForecastPeriod) -> String {
    let mut lines = vec!["---".to_string(), title.to_string()];
    lines.extend(fields.into_iter().map(|(key, value)| format!("{key}: {value}")));
    if let Some(details) = &period.detailed_forecast {
        lines.push(format!("Details: {details}"));
    }
    lines.join("\n")
}

fn weather(period: &ForecastPeriod) -> String {
    period
        .summary
        .clone()
        .unwrap_or_else(|| describe_weather_code(period.weather_code))
}

fn daily_weather(period: &ForecastPeriod) -> String {
    match (period.weather_code, period.night_weather_code) {
        (None, None) => weather(period),
        (day, night) => format!(
            "{} (Day), {} (Night)",
            describe_weather_code(day),
            describe_weather_code(night)
        ),
    }
}

/// `value * factor` to one decimal place, followed by `unit`
fn measure(value: Option<f64>, factor: f64, unit: &str) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.1}{unit}", v * factor))
}

/// `value` as the provider sent it, followed by `unit`
fn plain(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v}{unit}"))
}
