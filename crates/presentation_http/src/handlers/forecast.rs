//! Forecast handlers
//!
//! `GET /v1/forecast/{provider}/{kind}?latitude=..&longitude=..[&format=text]`

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use domain::{ForecastKind, GeoLocation, ProviderId};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Response body format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// The normalized forecast record
    #[default]
    Json,
    /// The plain-text report
    Text,
}

/// Query parameters for a forecast request
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Latitude (-90 to 90)
    pub latitude: f64,
    /// Longitude (-180 to 180)
    pub longitude: f64,
    /// Response format (default: json)
    #[serde(default)]
    pub format: ResponseFormat,
}

/// Fetch a forecast from one provider
#[instrument(skip(state, query))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Path((provider, kind)): Path<(String, String)>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let provider: ProviderId = provider.parse()?;
    let kind: ForecastKind = kind.parse()?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let location = GeoLocation::new(query.latitude, query.longitude)?;

    let record = state
        .providers
        .get_forecast(provider, location, kind)
        .await
        .inspect_err(|e| warn!(error = %e, "Forecast request failed"))?;

    info!(
        provider = %provider,
        kind = %kind,
        periods = record.periods.len(),
        "Forecast served"
    );

    Ok(match query.format {
        ResponseFormat::Json => Json(record).into_response(),
        ResponseFormat::Text => integration_weather::report::render(&record).into_response(),
    })
}
