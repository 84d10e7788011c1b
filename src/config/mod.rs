//! Client configuration module
//!
//! Provides the IremboPay client configuration as an explicit struct with
//! documented defaults. It can be built in code or loaded from environment
//! variables using the `config` and `dotenvy` crates. Environment variables use
//! the `IREMBOPAY` prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use irembopay::config::IremboPayConfig;
//!
//! let config = IremboPayConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.resolved_host());
//! ```

mod environment;
mod error;

pub use environment::{Environment, PRODUCTION_HOST, SANDBOX_HOST};
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;
use std::time::Duration;

/// API version sent when none is configured.
pub const DEFAULT_API_VERSION: &str = "2";

/// IremboPay client configuration
///
/// | Field | Default |
/// |---|---|
/// | `environment` | `sandbox` |
/// | `secret_key` | required |
/// | `api_version` | `"2"` |
/// | `host` | the environment's host |
/// | `scheme` | `"https"` |
/// | `request_timeout_secs` | `30` |
/// | `webhook_max_age_secs` | `300` |
#[derive(Debug, Clone, Deserialize)]
pub struct IremboPayConfig {
    /// Sandbox or production
    #[serde(default)]
    pub environment: Environment,

    /// Secret key sent with every request and used to sign webhooks
    #[serde(default)]
    pub secret_key: String,

    /// Value of the `X-API-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Host override (defaults to the environment's host)
    #[serde(default)]
    pub host: Option<String>,

    /// URL scheme; only local test servers should use `http`
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted webhook timestamp skew in seconds
    #[serde(default = "default_webhook_max_age")]
    pub webhook_max_age_secs: u64,
}

impl IremboPayConfig {
    /// Create a configuration for the given environment with all defaults.
    pub fn new(environment: Environment, secret_key: impl Into<String>) -> Self {
        Self {
            environment,
            secret_key: secret_key.into(),
            api_version: default_api_version(),
            host: None,
            scheme: default_scheme(),
            request_timeout_secs: default_request_timeout(),
            webhook_max_age_secs: default_webhook_max_age(),
        }
    }

    /// Sandbox configuration with defaults.
    pub fn sandbox(secret_key: impl Into<String>) -> Self {
        Self::new(Environment::Sandbox, secret_key)
    }

    /// Production configuration with defaults.
    pub fn production(secret_key: impl Into<String>) -> Self {
        Self::new(Environment::Production, secret_key)
    }

    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `IREMBOPAY` prefix
    /// 3. Uses `__` (double underscore) as the separator
    /// 4. Deserializes into [`IremboPayConfig`] and validates it
    ///
    /// # Environment Variable Format
    ///
    /// - `IREMBOPAY__SECRET_KEY=...` -> `secret_key`
    /// - `IREMBOPAY__ENVIRONMENT=production` -> `environment`
    /// - `IREMBOPAY__HOST=localhost:8080` -> `host`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed or fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: Self = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("IREMBOPAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Host requests are sent to: the override if set, else the environment's.
    pub fn resolved_host(&self) -> &str {
        self.host
            .as_deref()
            .unwrap_or_else(|| self.environment.default_host())
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get webhook max age as Duration
    pub fn webhook_max_age(&self) -> Duration {
        Duration::from_secs(self.webhook_max_age_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("IREMBOPAY__SECRET_KEY"));
        }
        if self.api_version.is_empty() {
            return Err(ValidationError::MissingRequired("IREMBOPAY__API_VERSION"));
        }

        let host = self.resolved_host();
        if host.is_empty() {
            return Err(ValidationError::MissingRequired("IREMBOPAY__HOST"));
        }
        if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidHost(host.to_string()));
        }

        if self.scheme != "https" && self.scheme != "http" {
            return Err(ValidationError::InvalidScheme(self.scheme.clone()));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.webhook_max_age_secs == 0 {
            return Err(ValidationError::InvalidWebhookMaxAge);
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_webhook_max_age() -> u64 {
    300
}
