//! Resolved connection settings for the IremboPay API.

use secrecy::{ExposeSecret, SecretString};

use crate::config::{IremboPayConfig, ValidationError};

/// Header carrying the account secret key.
pub const SECRET_KEY_HEADER: &str = "irembopay-secretKey";

/// Header carrying the API version.
pub const API_VERSION_HEADER: &str = "X-API-Version";

/// Validated credentials shared by every request of a client.
#[derive(Debug, Clone)]
pub struct Credentials {
    secret_key: SecretString,
    api_version: String,
    host: String,
    scheme: String,
}

impl Credentials {
    /// Validates `config` and captures the values requests need.
    pub fn from_config(config: &IremboPayConfig) -> Result<Self, ValidationError> {
        config.validate()?;

        Ok(Self {
            secret_key: SecretString::new(config.secret_key.clone()),
            api_version: config.api_version.clone(),
            host: config.resolved_host().to_string(),
            scheme: config.scheme.clone(),
        })
    }

    pub(crate) fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// `{scheme}://{host}` without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}
