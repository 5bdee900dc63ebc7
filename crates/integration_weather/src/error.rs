//! Forecast client error types

use thiserror::Error;

/// Errors that can occur while fetching a forecast
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Client is not usable as configured (e.g. missing credential)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// API key rejected by the provider
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider has no forecast for the requested point
    #[error("Location not covered by provider: {0}")]
    LocationNotCovered(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider answered with a non-success status
    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Coarse classification of a [`WeatherError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unreadable configuration
    Configuration,
    /// Caller supplied an unusable request
    InvalidInput,
    /// Request could not be completed
    Network,
    /// Credential rejected
    Authentication,
    /// Provider returned an error status or an unparseable payload
    Upstream,
}

impl WeatherError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidCoordinates => ErrorKind::InvalidInput,
            Self::ConnectionFailed(_) | Self::Timeout { .. } => ErrorKind::Network,
            Self::AuthenticationFailed(_) => ErrorKind::Authentication,
            Self::LocationNotCovered(_)
            | Self::RateLimitExceeded
            | Self::UpstreamStatus { .. }
            | Self::ParseError(_) => ErrorKind::Upstream,
        }
    }

    /// Map a transport-level reqwest error
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

impl From<domain::DomainError> for WeatherError {
    fn from(err: domain::DomainError) -> Self {
        match err {
            domain::DomainError::InvalidCoordinates { .. } => Self::InvalidCoordinates,
            other => Self::Configuration(other.to_string()),
        }
    }
}
