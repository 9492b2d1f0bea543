//! # Backend configuration
//!
//! The only thing the app needs to know about its environment is where the
//! backend lives and how long to wait for it. Sources, later ones winning:
//!
//! 1. built-in defaults (the Android emulator's view of a backend on the host)
//! 2. an optional `fideliza.toml` in the working directory
//! 3. `FIDELIZA_*` environment variables, after loading `.env` if present
//!
//! ```toml
//! base_url = "https://fideliza.example.com/api/v1"
//! timeout_secs = 15
//! ```

use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Origin plus API prefix; endpoint paths are appended to it.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from defaults, `fideliza.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(Environment::with_prefix("FIDELIZA").try_parsing(true))
    }

    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        let config: ApiConfig = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(
                File::with_name("fideliza")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check that `base_url` is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(&format!("unsupported scheme {other}"))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
