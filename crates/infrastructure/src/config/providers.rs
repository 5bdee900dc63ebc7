//! Forecast provider configuration.

use std::path::PathBuf;

use integration_weather::MetOfficeConfig;
use serde::{Deserialize, Serialize};

/// Met Office section: client settings plus where the API key lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetOfficeAppConfig {
    /// HTTP client settings
    #[serde(flatten)]
    pub client: MetOfficeConfig,

    /// Plain-text file holding the DataHub API key
    #[serde(default = "default_api_key_file")]
    pub api_key_file: PathBuf,

    /// Environment variable consulted when the key file is unusable
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_file() -> PathBuf {
    PathBuf::from("met_office_api_key.txt")
}

fn default_api_key_env() -> String {
    "MET_OFFICE_API_KEY".to_string()
}

impl Default for MetOfficeAppConfig {
    fn default() -> Self {
        Self {
            client: MetOfficeConfig::default(),
            api_key_file: default_api_key_file(),
            api_key_env: default_api_key_env(),
        }
    }
}
