//! Value Objects - Immutable, identity-less domain primitives

mod forecast_kind;
mod geo_location;
mod provider_id;

pub use forecast_kind::ForecastKind;
pub use geo_location::GeoLocation;
pub use provider_id::ProviderId;
