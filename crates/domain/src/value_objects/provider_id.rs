//! Provider identity - which upstream weather service answers a request

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::DomainError;

/// Supported forecast providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    /// US National Weather Service (api.weather.gov)
    Nws,
    /// UK Met Office DataHub site-specific forecasts
    MetOffice,
}

impl ProviderId {
    /// All providers, in registration order
    pub const ALL: [Self; 2] = [Self::Nws, Self::MetOffice];

    /// Get the display name for this provider
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Nws => "National Weather Service",
            Self::MetOffice => "Met Office DataHub",
        }
    }

    /// Get the key used in URLs and config
    #[must_use]
    pub const fn config_key(&self) -> &'static str {
        match self {
            Self::Nws => "nws",
            Self::MetOffice => "met-office",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nws" | "weather.gov" => Ok(Self::Nws),
            "met-office" | "metoffice" | "met_office" => Ok(Self::MetOffice),
            _ => Err(DomainError::UnknownProvider(s.to_string())),
        }
    }
}
