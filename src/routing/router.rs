//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes with their resolved service URLs
//! - Look up matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan in declaration order (acceptable for typical route counts)
//! - Explicit NotFound rather than silent default

use thiserror::Error;

use crate::config::{RouteConfig, ServiceConfig};
use crate::routing::matcher::PathPrefixMatcher;

/// Routing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Service not found")]
    NotFound { path: String },
}

/// A compiled route: prefix plus the service it forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    matcher: PathPrefixMatcher,
    /// Service name for logging/metrics.
    pub service: String,
    /// Base URL without a trailing slash.
    pub target: String,
}

impl Route {
    pub fn new(prefix: impl Into<String>, service: impl Into<String>, target: &str) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            service: service.into(),
            target: target.trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }
}

/// Ordered route table. The first route whose prefix matches wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Compile route configs against the service list.
    /// Routes naming an unknown service are skipped; validation rejects them
    /// before a config gets this far.
    pub fn from_config(routes: &[RouteConfig], services: &[ServiceConfig]) -> Self {
        let mut compiled = Vec::with_capacity(routes.len());
        for route in routes {
            match services.iter().find(|s| s.name == route.service) {
                Some(service) => compiled.push(Route::new(
                    route.path_prefix.clone(),
                    service.name.clone(),
                    &service.url,
                )),
                None => tracing::warn!(
                    prefix = %route.path_prefix,
                    service = %route.service,
                    "Route references unknown service, skipping"
                ),
            }
        }
        Self { routes: compiled }
    }

    /// Resolve the route for `path`.
    pub fn resolve(&self, path: &str) -> Result<&Route, RouteError> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .ok_or_else(|| RouteError::NotFound {
                path: path.to_string(),
            })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
