//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every section falls back to the platform defaults when omitted.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

/// Root configuration for the API gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend services, addressed by name from `routes`.
    pub services: Vec<ServiceConfig>,

    /// Ordered route table. The first matching prefix wins.
    pub routes: Vec<RouteConfig>,

    /// Ordered path prefixes that bypass authentication.
    pub public_routes: Vec<String>,

    /// Bearer token verification settings.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cross-origin settings for browser clients.
    pub cors: CorsConfig,

    /// Request hardening settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            services: default_services(),
            routes: default_routes(),
            public_routes: default_public_routes(),
            auth: AuthConfig::default(),
            timeouts: TimeoutConfig::default(),
            cors: CorsConfig::default(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Look up a service's base URL by name.
    pub fn service_url(&self, name: &str) -> Option<&str> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.url.as_str())
    }

    /// Point an existing service at a new base URL.
    /// Returns false if no service carries that name.
    pub fn set_service_url(&mut self, name: &str, url: impl Into<String>) -> bool {
        match self.services.iter_mut().find(|s| s.name == name) {
            Some(service) => {
                service.url = url.into();
                true
            }
            None => false,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// A backend service reachable over HTTP.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Unique service identifier, used by routes and in logs/metrics.
    pub name: String,

    /// Base URL requests are forwarded to (e.g., "http://auth-service:8000").
    pub url: String,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Route configuration mapping a path prefix to a service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path prefix to match (byte-wise, case-sensitive).
    pub path_prefix: String,

    /// Name of the service to forward to.
    pub service: String,
}

impl RouteConfig {
    pub fn new(path_prefix: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            service: service.into(),
        }
    }
}

/// Bearer token verification settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HMAC secret, identical to the one the auth service signs with.
    pub secret: String,

    /// Signing algorithm (HS256, HS384 or HS512).
    pub algorithm: Algorithm,

    /// Clock skew tolerated when checking `exp`, in seconds.
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            secret: "supersecretkey".to_string(),
            algorithm: Algorithm::HS256,
            leeway_secs: 0,
        }
    }
}

/// Timeout configuration for backend calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    ///
    /// Unset by default: `forward_secs` alone bounds the whole exchange, and
    /// a connect that exceeds either limit is reported as a timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_secs: Option<u64>,

    /// Total time allowed for one forwarded exchange, in seconds.
    pub forward_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: None,
            forward_secs: 30,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the gateway from a browser. `"*"` allows any.
    pub allowed_origins: Vec<String>,

    /// Whether browsers may send credentials (cookies, auth headers).
    pub allow_credentials: bool,

    /// How long preflight results may be cached, in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            allow_credentials: true,
            max_age_secs: 600,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // product images go through /uploads
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

fn default_services() -> Vec<ServiceConfig> {
    ["auth", "product", "order", "payment"]
        .into_iter()
        .map(|name| ServiceConfig::new(name, format!("http://{}-service:8000", name)))
        .collect()
}

fn default_routes() -> Vec<RouteConfig> {
    [
        ("/api/v1/auth", "auth"),
        ("/api/v1/users", "auth"),
        ("/api/v1/admin/users", "auth"),
        ("/api/v1/admin/products", "product"),
        ("/api/v1/admin/categories", "product"),
        ("/api/v1/admin/orders", "order"),
        ("/api/v1/cart", "order"),
        ("/api/v1/products", "product"),
        ("/api/v1/categories", "product"),
        ("/api/v1/wishlist", "product"),
        ("/api/v1/orders", "order"),
        ("/api/v1/analytics", "order"),
        ("/api/v1/payments", "payment"),
        ("/uploads", "product"),
    ]
    .into_iter()
    .map(|(prefix, service)| RouteConfig::new(prefix, service))
    .collect()
}

fn default_public_routes() -> Vec<String> {
    [
        "/api/v1/auth/register",
        "/api/v1/auth/login",
        "/api/v1/products",
        "/api/v1/categories",
        "/uploads",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_platform_service() {
        let config = GatewayConfig::default();
        for name in ["auth", "product", "order", "payment"] {
            assert!(config.service_url(name).is_some(), "missing {name}");
        }
        assert!(config.routes.iter().all(|r| config.service_url(&r.service).is_some()));
        assert_eq!(config.timeouts.forward_secs, 30);
        assert_eq!(config.auth.algorithm, Algorithm::HS256);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            public_routes = ["/open"]

            [auth]
            secret = "s3cret"
            algorithm = "HS512"

            [[routes]]
            path_prefix = "/api"
            service = "product"
            "#,
        )
        .unwrap();

        assert_eq!(config.public_routes, vec!["/open".to_string()]);
        assert_eq!(config.routes, vec![RouteConfig::new("/api", "product")]);
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.auth.algorithm, Algorithm::HS512);
        assert_eq!(config.auth.leeway_secs, 0);
        assert_eq!(config.services.len(), 4);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn set_service_url_only_touches_known_services() {
        let mut config = GatewayConfig::default();
        assert!(config.set_service_url("order", "http://127.0.0.1:9001"));
        assert_eq!(config.service_url("order"), Some("http://127.0.0.1:9001"));
        assert!(!config.set_service_url("inventory", "http://127.0.0.1:9002"));
    }
}
