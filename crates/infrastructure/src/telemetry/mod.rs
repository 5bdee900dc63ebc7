//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus a `fmt`
//! layer in human-readable or JSON form.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
