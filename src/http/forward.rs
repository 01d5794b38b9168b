//! Request forwarding to backend services.
//!
//! # Responsibilities
//! - Build the backend URL: service base URL + original path + query
//! - Preserve method, headers (minus `Host`) and body
//! - Bound the whole exchange with one timeout
//! - Relay the backend's status, headers and body unchanged
//!
//! # Design Decisions
//! - At most one attempt per request: no retries, no backoff
//! - The response body is read in full inside the timeout, so a client
//!   either gets the complete backend response or an error status
//! - Connection pooling is left to the hyper client

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::config::TimeoutConfig;
use crate::http::request::InboundRequest;
use crate::net::InFlightTracker;
use crate::routing::Route;

/// Backend exchange failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    #[error("Service '{service}' is unreachable: {reason}")]
    Unreachable { service: String, reason: String },

    #[error("Service '{service}' did not respond within {}s", .after.as_secs())]
    Timeout { service: String, after: Duration },

    #[error("Service unavailable: {reason}")]
    Unavailable { service: String, reason: String },
}

impl ForwardError {
    pub fn service(&self) -> &str {
        match self {
            ForwardError::Unreachable { service, .. }
            | ForwardError::Timeout { service, .. }
            | ForwardError::Unavailable { service, .. } => service,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Unreachable { .. } => "unreachable",
            ForwardError::Timeout { .. } => "timeout",
            ForwardError::Unavailable { .. } => "unavailable",
        }
    }
}

/// Forwards requests to backends over a shared pooled client.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    inflight: InFlightTracker,
}

impl Forwarder {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(timeouts.connect_secs.map(Duration::from_secs));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            timeout: Duration::from_secs(timeouts.forward_secs),
            inflight: InFlightTracker::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn inflight(&self) -> &InFlightTracker {
        &self.inflight
    }

    /// Forward `request` to `route`'s service and return its response.
    pub async fn forward(
        &self,
        request: InboundRequest,
        route: &Route,
    ) -> Result<Response<Body>, ForwardError> {
        let outbound = build_request(request, route)?;
        let guard = self.inflight.track(&route.service);

        tracing::debug!(
            forward_id = %guard.id(),
            service = %route.service,
            target = %outbound.uri(),
            "Forwarding request"
        );

        let result = match tokio::time::timeout(self.timeout, self.exchange(outbound, route)).await
        {
            Ok(result) => result,
            Err(_) => Err(ForwardError::Timeout {
                service: route.service.clone(),
                after: self.timeout,
            }),
        };

        guard.complete();
        result
    }

    async fn exchange(
        &self,
        outbound: Request<Body>,
        route: &Route,
    ) -> Result<Response<Body>, ForwardError> {
        let response = self
            .client
            .request(outbound)
            .await
            .map_err(|e| classify_client_error(&route.service, &e, self.timeout))?;

        relay(response, &route.service).await
    }
}

fn build_request(request: InboundRequest, route: &Route) -> Result<Request<Body>, ForwardError> {
    let target = format!("{}{}", route.target, request.path_and_query());
    let uri: Uri = target.parse().map_err(|e: axum::http::uri::InvalidUri| {
        ForwardError::Unavailable {
            service: route.service.clone(),
            reason: format!("invalid target url: {}", e),
        }
    })?;

    let mut headers = request.headers;
    headers.remove(header::HOST);
    strip_hop_by_hop(&mut headers);

    let mut outbound = Request::new(Body::from(request.body));
    *outbound.method_mut() = request.method;
    *outbound.uri_mut() = uri;
    *outbound.headers_mut() = headers;
    Ok(outbound)
}

/// Read the full backend body and rebuild the response around it.
async fn relay(response: Response<Incoming>, service: &str) -> Result<Response<Body>, ForwardError> {
    let (mut parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
        .await
        .map_err(|e| ForwardError::Unavailable {
            service: service.to_string(),
            reason: format!("failed to read response body: {}", e),
        })?;

    // The body is now a fixed-length buffer; hyper re-derives the framing.
    strip_hop_by_hop(&mut parts.headers);

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Headers that describe one connection, not the message (RFC 9110 §7.6.1).
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Remove hop-by-hop headers, including any named in `Connection`.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// True if an `io::Error` of kind `TimedOut` sits anywhere in the source chain.
fn is_timeout(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        current = e.source();
    }
    false
}

fn classify_client_error(
    service: &str,
    error: &hyper_util::client::legacy::Error,
    after: Duration,
) -> ForwardError {
    if error.is_connect() && is_timeout(error) {
        ForwardError::Timeout {
            service: service.to_string(),
            after,
        }
    } else if error.is_connect() {
        ForwardError::Unreachable {
            service: service.to_string(),
            reason: error.to_string(),
        }
    } else {
        ForwardError::Unavailable {
            service: service.to_string(),
            reason: error.to_string(),
        }
    }
}
