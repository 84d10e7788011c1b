//! IremboPay environment selection

use serde::Deserialize;

/// Host serving the sandbox (testing) API.
pub const SANDBOX_HOST: &str = "api.sandbox.irembopay.com";

/// Host serving the production (live) API.
pub const PRODUCTION_HOST: &str = "api.irembopay.com";

/// IremboPay environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Default API host for this environment
    pub fn default_host(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_HOST,
            Environment::Production => PRODUCTION_HOST,
        }
    }

    /// Check if this is the live environment
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}
