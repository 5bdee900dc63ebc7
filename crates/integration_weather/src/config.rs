//! Forecast client configuration

use serde::{Deserialize, Serialize};

/// National Weather Service client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NwsConfig {
    /// API base URL (default: <https://api.weather.gov>)
    #[serde(default = "default_nws_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header; NWS rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_nws_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    format!("forecaster/{} (github.com/forecaster)", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout() -> u64 {
    30
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: default_nws_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Met Office DataHub site-specific client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetOfficeConfig {
    /// Point forecast base URL
    /// (default: <https://data.hub.api.metoffice.gov.uk/sitespecific/v0/point>)
    #[serde(default = "default_met_office_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// DataHub `dataSource` parameter (default: BD1)
    #[serde(default = "default_data_source")]
    pub data_source: String,

    /// Ask the DataHub to resolve a location name for the point
    #[serde(default = "default_include_location_name")]
    pub include_location_name: bool,
}

fn default_met_office_base_url() -> String {
    "https://data.hub.api.metoffice.gov.uk/sitespecific/v0/point".to_string()
}

fn default_data_source() -> String {
    "BD1".to_string()
}

const fn default_include_location_name() -> bool {
    true
}

impl Default for MetOfficeConfig {
    fn default() -> Self {
        Self {
            base_url: default_met_office_base_url(),
            timeout_secs: default_timeout(),
            data_source: default_data_source(),
            include_location_name: default_include_location_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nws_defaults() {
        let config = NwsConfig::default();
        assert_eq!(config.base_url, "https://api.weather.gov");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("forecaster/"));
    }

    #[test]
    fn met_office_defaults() {
        let config = MetOfficeConfig::default();
        assert_eq!(
            config.base_url,
            "https://data.hub.api.metoffice.gov.uk/sitespecific/v0/point"
        );
        assert_eq!(config.data_source, "BD1");
        assert!(config.include_location_name);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: MetOfficeConfig =
            serde_json::from_str(r#"{"timeout_secs": 5}"#).expect("should deserialize");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.data_source, "BD1");
    }
}
