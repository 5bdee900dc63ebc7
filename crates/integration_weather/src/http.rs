//! Shared request/response handling for the provider clients

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::WeatherError;

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Send `request` and decode a JSON body
///
/// Transport failures map to network errors, non-success statuses to
/// `UpstreamStatus` (or `RateLimitExceeded` for 429) and undecodable
/// bodies to `ParseError`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout_secs: u64,
) -> Result<T, WeatherError> {
    let response = request
        .send()
        .await
        .map_err(|e| WeatherError::from_transport(&e, timeout_secs))?;

    let status = response.status();
    debug!(status = %status, "Received upstream response");

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(WeatherError::RateLimitExceeded);
    }

    let body = response
        .text()
        .await
        .map_err(|e| WeatherError::from_transport(&e, timeout_secs))?;

    if !status.is_success() {
        return Err(WeatherError::UpstreamStatus {
            status: status.as_u16(),
            message: truncate(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate("  Not Found \n"), "Not Found");
    }

    #[test]
    fn truncate_cuts_long_bodies() {
        let long = "x".repeat(500);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY + 1);
        assert!(cut.ends_with('…'));
    }
}
