//! API error handling
//!
//! Maps forecast failures onto HTTP statuses with a uniform JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use integration_weather::{ErrorKind, WeatherError};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            Self::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured"),
            Self::UpstreamAuth(_) => (StatusCode::BAD_GATEWAY, "upstream_auth_failed"),
            Self::UpstreamUnreachable(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_unreachable"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let (message, details) = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => (msg, None),
            Self::RateLimited => ("Upstream rate limit exceeded".to_string(), None),
            Self::NotConfigured(msg) => ("Provider is not configured".to_string(), Some(msg)),
            Self::UpstreamAuth(msg) => (
                "Provider rejected the configured credential".to_string(),
                Some(msg),
            ),
            Self::UpstreamUnreachable(msg) => ("Provider could not be reached".to_string(), Some(msg)),
            Self::Upstream(msg) => ("Provider returned an error".to_string(), Some(msg)),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        if matches!(err, WeatherError::RateLimitExceeded) {
            return Self::RateLimited;
        }

        let message = err.to_string();
        match err.kind() {
            ErrorKind::Configuration => Self::NotConfigured(message),
            ErrorKind::InvalidInput => Self::BadRequest(message),
            ErrorKind::Network => Self::UpstreamUnreachable(message),
            ErrorKind::Authentication => Self::UpstreamAuth(message),
            ErrorKind::Upstream => Self::Upstream(message),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCoordinates { .. } => Self::BadRequest(err.to_string()),
            DomainError::UnknownProvider(_) | DomainError::UnknownForecastKind(_) => {
                Self::NotFound(err.to_string())
            },
        }
    }
}
