//! API credential for the Met Office DataHub
//!
//! The key is read once at startup and held read-only for the lifetime of
//! the process. It never appears in `Debug` output or logs.

use std::{fmt, path::Path};

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::WeatherError;

/// Opaque, non-empty API key
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wrap an in-memory key
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Configuration` if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, WeatherError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }
        Ok(Self(SecretString::from(trimmed.to_owned())))
    }

    /// Load the key from a plain-text file containing a single value
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Configuration` if the file is missing, unreadable
    /// or empty.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WeatherError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WeatherError::Configuration(format!(
                "Cannot read API key file {}: {e}",
                path.display()
            ))
        })?;

        let key = Self::new(contents).map_err(|_| {
            WeatherError::Configuration(format!("API key file {} is empty", path.display()))
        })?;
        debug!(path = %path.display(), "Loaded API key from file");
        Ok(key)
    }

    /// Load the key from an environment variable
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Configuration` if the variable is unset, not
    /// valid UTF-8, or empty.
    pub fn from_env(var: &str) -> Result<Self, WeatherError> {
        let value = std::env::var(var).map_err(|e| {
            WeatherError::Configuration(format!("Environment variable {var} not usable: {e}"))
        })?;
        let key = Self::new(value).map_err(|_| {
            WeatherError::Configuration(format!("Environment variable {var} is empty"))
        })?;
        debug!(env_var = %var, "Loaded API key from environment");
        Ok(key)
    }

    /// Reveal the key for attaching to an outbound request
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rejects_empty_key() {
        assert!(matches!(
            ApiKey::new("   \n"),
            Err(WeatherError::Configuration(_))
        ));
    }

    #[test]
    fn trims_whitespace() {
        let key = ApiKey::new("  abc123\n").expect("valid key");
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn debug_is_redacted() {
        let key = ApiKey::new("super-secret").expect("valid key");
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn loads_from_file_with_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "file-key-42").expect("write");

        let key = ApiKey::from_file(file.path()).expect("should load");
        assert_eq!(key.expose(), "file-key-42");
    }

    #[test]
    fn empty_file_is_configuration_error() {
        let file = tempfile::NamedTempFile::new().expect("temp file");

        let err = ApiKey::from_file(file.path()).expect_err("empty file must fail");
        assert!(matches!(err, WeatherError::Configuration(ref msg) if msg.contains("empty")));
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("does-not-exist.txt");

        let err = ApiKey::from_file(&path).expect_err("missing file must fail");
        assert!(matches!(err, WeatherError::Configuration(ref msg) if msg.contains("Cannot read")));
    }

    #[test]
    fn missing_env_var_is_configuration_error() {
        let err = ApiKey::from_env("FORECASTER_TEST_SURELY_UNSET_KEY_93817")
            .expect_err("unset variable must fail");
        assert!(matches!(err, WeatherError::Configuration(_)));
    }
}
