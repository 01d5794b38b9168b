//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that point a service at a different base URL.
pub const SERVICE_URL_VARS: [(&str, &str); 4] = [
    ("AUTH_SERVICE_URL", "auth"),
    ("PRODUCT_SERVICE_URL", "product"),
    ("ORDER_SERVICE_URL", "order"),
    ("PAYMENT_SERVICE_URL", "payment"),
];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides from a variable lookup (the process environment in
/// production, a map in tests).
pub fn apply_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, service) in SERVICE_URL_VARS {
        if let Some(url) = lookup(var) {
            if !config.set_service_url(service, url) {
                return Err(ConfigError::Env {
                    var,
                    reason: format!("no service named '{}' is configured", service),
                });
            }
        }
    }

    if let Some(secret) = lookup("JWT_SECRET_KEY") {
        config.auth.secret = secret;
    }

    if let Some(raw) = lookup("JWT_ALGORITHM") {
        config.auth.algorithm = Algorithm::from_str(&raw).map_err(|e| ConfigError::Env {
            var: "JWT_ALGORITHM",
            reason: e.to_string(),
        })?;
    }

    if let Some(addr) = lookup("GATEWAY_BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }

    Ok(())
}
