//! Domain-level errors

use thiserror::Error;

/// Errors raised while constructing domain values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Coordinates outside the valid WGS84 range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Provider name that does not match any supported provider
    #[error("Unknown forecast provider: {0}")]
    UnknownProvider(String),

    /// Forecast resolution that is not supported
    #[error("Unknown forecast kind: {0}")]
    UnknownForecastKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_message_names_both_axes() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("latitude"));
        assert!(msg.contains("longitude"));
        assert!(msg.contains("91"));
    }

    #[test]
    fn unknown_provider_message() {
        let err = DomainError::UnknownProvider("accuweather".to_string());
        assert_eq!(err.to_string(), "Unknown forecast provider: accuweather");
    }

    #[test]
    fn unknown_kind_message() {
        let err = DomainError::UnknownForecastKind("weekly".to_string());
        assert_eq!(err.to_string(), "Unknown forecast kind: weekly");
    }
}
