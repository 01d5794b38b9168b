//! Per-request gateway pipeline.
//!
//! # States
//! ```text
//! Received → Classified → (AuthChecked | AuthSkipped) → Routed → Forwarded → Responded
//!
//! Terminal failures:
//!     AuthChecked failed  → 401 (backend never contacted)
//!     Routed failed       → 404
//!     Forwarded failed    → 502 | 503 | 504
//! ```
//!
//! Authentication runs before routing for protected paths, so an
//! unauthenticated request to an unknown path is a 401, not a 404.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Response;

use crate::auth::{Authenticator, TokenVerifier};
use crate::config::GatewayConfig;
use crate::http::forward::Forwarder;
use crate::http::request::InboundRequest;
use crate::http::response::GatewayError;
use crate::observability::metrics;
use crate::routing::{PublicRoutes, RouteTable};

/// Composes classifier, verifier, route table and forwarder.
#[derive(Clone)]
pub struct Gateway {
    public_routes: PublicRoutes,
    routes: RouteTable,
    authenticator: Arc<dyn Authenticator>,
    forwarder: Forwarder,
}

impl Gateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            public_routes: PublicRoutes::new(config.public_routes.iter().cloned()),
            routes: RouteTable::from_config(&config.routes, &config.services),
            authenticator: Arc::new(TokenVerifier::new(&config.auth)),
            forwarder: Forwarder::new(&config.timeouts),
        }
    }

    /// Replace the token verifier.
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }

    /// Run one request through the pipeline.
    #[tracing::instrument(
        name = "gateway",
        skip_all,
        fields(
            request_id = %request.request_id(),
            method = %request.method,
            path = %request.path(),
            service = tracing::field::Empty,
            subject = tracing::field::Empty,
        )
    )]
    pub async fn handle(&self, request: InboundRequest) -> Result<Response<Body>, GatewayError> {
        let start = Instant::now();
        let method = request.method.to_string();
        let span = tracing::Span::current();

        if self.public_routes.is_public(request.path()) {
            tracing::debug!("Public route, authentication skipped");
        } else {
            match self.authenticator.authenticate(request.authorization()) {
                Ok(claims) => {
                    span.record("subject", claims.sub.as_str());
                    tracing::debug!(role = %claims.role, "Authenticated");
                }
                Err(e) => {
                    tracing::info!(reason = e.reason(), "Authentication failed");
                    metrics::record_auth_failure(e.reason());
                    let error = GatewayError::from(e);
                    metrics::record_request(&method, error.status().as_u16(), "none", start);
                    return Err(error);
                }
            }
        }

        let route = match self.routes.resolve(request.path()) {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!("No route matched");
                let error = GatewayError::from(e);
                metrics::record_request(&method, error.status().as_u16(), "none", start);
                return Err(error);
            }
        };
        span.record("service", route.service.as_str());

        match self.forwarder.forward(request, route).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    status = status.as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Relaying backend response"
                );
                metrics::record_request(&method, status.as_u16(), &route.service, start);
                Ok(response)
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Upstream error");
                metrics::record_forward_error(e.service(), e.kind());
                let error = GatewayError::from(e);
                metrics::record_request(&method, error.status().as_u16(), &route.service, start);
                Err(error)
            }
        }
    }
}
