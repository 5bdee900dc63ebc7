//! Forecast provider integrations
//!
//! Clients for two independent upstream forecast services:
//!
//! - [`NwsClient`]: the US National Weather Service (<https://api.weather.gov>),
//!   no API key required.
//! - [`MetOfficeClient`]: the UK Met Office DataHub site-specific forecast API,
//!   authenticated with an [`ApiKey`] loaded from a local file.
//!
//! Both implement [`ForecastClient`] and return a normalized [`ForecastRecord`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{ForecastKind, GeoLocation};
//! use integration_weather::{ApiKey, ForecastClient, MetOfficeClient, MetOfficeConfig};
//!
//! let key = ApiKey::from_file("met_office_api_key.txt")?;
//! let client = MetOfficeClient::new(MetOfficeConfig::default(), Some(key))?;
//!
//! let london = GeoLocation::new(51.5074, -0.1278)?;
//! let record = client.get_forecast(london, ForecastKind::Daily).await?;
//! println!("{}", integration_weather::report::render(&record));
//! ```

mod config;
mod credential;
mod error;
mod http;
mod met_office;
mod models;
mod nws;
mod provider;
pub mod report;
mod significant_weather;

pub use config::{MetOfficeConfig, NwsConfig};
pub use credential::ApiKey;
pub use error::{ErrorKind, WeatherError};
pub use met_office::MetOfficeClient;
pub use models::{ForecastPeriod, ForecastRecord};
pub use nws::NwsClient;
pub use provider::ForecastClient;
pub use significant_weather::describe_weather_code;
