//! Met Office significant weather codes
//!
//! See the DataHub site-specific API documentation for the code table.

/// Description for a significant weather code
const CODES: [&str; 31] = [
    "Clear night",
    "Sunny day",
    "Partly cloudy (night)",
    "Partly cloudy (day)",
    "Not used",
    "Mist",
    "Fog",
    "Cloudy",
    "Overcast",
    "Light rain shower (night)",
    "Light rain shower (day)",
    "Drizzle",
    "Light rain",
    "Heavy rain shower (night)",
    "Heavy rain shower (day)",
    "Heavy rain",
    "Sleet shower (night)",
    "Sleet shower (day)",
    "Sleet",
    "Hail shower (night)",
    "Hail shower (day)",
    "Hail",
    "Light snow shower (night)",
    "Light snow shower (day)",
    "Light snow",
    "Heavy snow shower (night)",
    "Heavy snow shower (day)",
    "Heavy snow",
    "Thunder shower (night)",
    "Thunder shower (day)",
    "Thunder",
];

/// Human-readable description of a significant weather code
///
/// `None` is the DataHub's "NA" and reads "Not available".
#[must_use]
pub fn describe_weather_code(code: Option<i32>) -> String {
    match code {
        None => "Not available".to_string(),
        Some(c) => usize::try_from(c)
            .ok()
            .and_then(|i| CODES.get(i))
            .map_or_else(|| format!("Unknown code: {c}"), |s| (*s).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(describe_weather_code(Some(0)), "Clear night");
        assert_eq!(describe_weather_code(Some(1)), "Sunny day");
        assert_eq!(describe_weather_code(Some(12)), "Light rain");
        assert_eq!(describe_weather_code(Some(30)), "Thunder");
    }

    #[test]
    fn missing_code_is_not_available() {
        assert_eq!(describe_weather_code(None), "Not available");
    }

    #[test]
    fn out_of_range_codes() {
        assert_eq!(describe_weather_code(Some(31)), "Unknown code: 31");
        assert_eq!(describe_weather_code(Some(-1)), "Unknown code: -1");
    }
}
