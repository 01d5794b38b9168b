//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference existing services)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect routes that an earlier route shadows
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use jsonwebtoken::Algorithm;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("service '{0}' is defined more than once")]
    DuplicateService(String),

    #[error("service '{service}' has an invalid url: {reason}")]
    InvalidServiceUrl { service: String, reason: String },

    #[error("route '{prefix}' references unknown service '{service}'")]
    UnknownService { prefix: String, service: String },

    #[error("path prefix '{0}' must start with '/'")]
    InvalidPrefix(String),

    #[error("route '{prefix}' can never match: '{shadowed_by}' is declared first")]
    ShadowedRoute { prefix: String, shadowed_by: String },

    #[error("auth secret must not be empty")]
    EmptySecret,

    #[error("auth algorithm {0:?} is not an HMAC algorithm")]
    UnsupportedAlgorithm(Algorithm),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mut names = HashSet::new();
    for service in &config.services {
        if !names.insert(service.name.as_str()) {
            errors.push(ValidationError::DuplicateService(service.name.clone()));
        }
        if let Err(reason) = check_service_url(&service.url) {
            errors.push(ValidationError::InvalidServiceUrl {
                service: service.name.clone(),
                reason,
            });
        }
    }

    for (i, route) in config.routes.iter().enumerate() {
        if !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix(route.path_prefix.clone()));
        }
        if !names.contains(route.service.as_str()) {
            errors.push(ValidationError::UnknownService {
                prefix: route.path_prefix.clone(),
                service: route.service.clone(),
            });
        }
        if let Some(earlier) = config.routes[..i]
            .iter()
            .find(|earlier| route.path_prefix.starts_with(&earlier.path_prefix))
        {
            errors.push(ValidationError::ShadowedRoute {
                prefix: route.path_prefix.clone(),
                shadowed_by: earlier.path_prefix.clone(),
            });
        }
    }

    for prefix in &config.public_routes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix(prefix.clone()));
        }
    }

    if config.auth.secret.is_empty() {
        errors.push(ValidationError::EmptySecret);
    }
    if !matches!(
        config.auth.algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    ) {
        errors.push(ValidationError::UnsupportedAlgorithm(config.auth.algorithm));
    }

    if config.timeouts.forward_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("forward_secs"));
    }
    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }

    for origin in &config.cors.allowed_origins {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::InvalidCorsOrigin(origin.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Backends are plain HTTP services on the internal network.
fn check_service_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("base url must not carry a query or fragment".to_string());
    }
    Ok(())
}
