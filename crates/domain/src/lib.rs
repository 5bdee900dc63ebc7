//! Domain layer for Forecaster
//!
//! Value objects describing *what* is being forecast: where (`GeoLocation`),
//! at which resolution (`ForecastKind`) and by whom (`ProviderId`).
//! This crate performs no I/O.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
