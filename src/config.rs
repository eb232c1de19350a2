//! Client configuration.
//!
//! Holds the application credentials and the authority base URL, plus
//! the HTTP timeouts applied when the client is built. The master secret
//! never leaves this struct except through the signing function, and it
//! is redacted from `Debug` output.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default authority base URL.
pub const DEFAULT_BASE_URL: &str = "https://restapi.getui.com/v2";

/// HTTP request timeout.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// TCP connect timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct Config {
    pub app_id: String,
    pub app_key: String,
    pub master_secret: String,
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration pointing at the production authority.
    /// Validation is deferred to [`Client::new`](crate::Client::new).
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        master_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            master_secret: master_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the environment, reading a `.env` file
    /// first when one is present.
    ///
    /// Recognized keys: `PUSHGATE_APP_ID`, `PUSHGATE_APP_KEY`,
    /// `PUSHGATE_MASTER_SECRET`, and optionally `PUSHGATE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        // Silently ignore a missing .env file
        let _ = dotenvy::dotenv();

        let mut config = Config::new(
            std::env::var("PUSHGATE_APP_ID").unwrap_or_default(),
            std::env::var("PUSHGATE_APP_KEY").unwrap_or_default(),
            std::env::var("PUSHGATE_MASTER_SECRET").unwrap_or_default(),
        );
        if let Ok(base_url) = std::env::var("PUSHGATE_BASE_URL") {
            config.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every required field is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(Error::Config("app_id"));
        }
        if self.app_key.is_empty() {
            return Err(Error::Config("app_key"));
        }
        if self.master_secret.is_empty() {
            return Err(Error::Config("master_secret"));
        }
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url"));
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("app_key", &self.app_key)
            .field("master_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_production_defaults() {
        let config = Config::new("id", "key", "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_names_the_missing_field() {
        let config = Config::new("", "key", "secret");
        match config.validate().unwrap_err() {
            Error::Config(field) => assert_eq!(field, "app_id"),
            other => panic!("unexpected error: {other:?}"),
        }

        let config = Config::new("id", "key", "");
        match config.validate().unwrap_err() {
            Error::Config(field) => assert_eq!(field, "master_secret"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn debug_redacts_master_secret() {
        let config = Config::new("id", "key", "very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
