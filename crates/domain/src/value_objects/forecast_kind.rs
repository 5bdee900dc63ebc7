//! Forecast resolution

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::DomainError;

/// Time resolution of a forecast request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastKind {
    /// One period per hour
    Hourly,
    /// One period per day (or per day/night half for some providers)
    #[default]
    Daily,
}

impl ForecastKind {
    /// Path segment used in URLs and config
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for ForecastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            _ => Err(DomainError::UnknownForecastKind(s.to_string())),
        }
    }
}
