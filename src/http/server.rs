//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health check and the catch-all gateway handler
//! - Wire up middleware (request ID, tracing, CORS, body limit)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::cors::build_cors_layer;
use crate::http::handler::Gateway;
use crate::http::request::{InboundRequest, MakeRequestUuidV4};
use crate::lifecycle::shutdown::notified;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

/// HTTP server for the API gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
    gateway: Arc<Gateway>,
}

impl GatewayServer {
    /// Create a new server from an already validated configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let gateway = Arc::new(Gateway::new(&config));
        Self::with_gateway(config, gateway)
    }

    /// Create a server around a prebuilt gateway pipeline.
    pub fn with_gateway(config: GatewayConfig, gateway: Arc<Gateway>) -> Self {
        let state = AppState {
            gateway: gateway.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config: Arc::new(config),
            gateway,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            // Only GET is the health check; other methods are ordinary traffic.
            .route("/health", get(health_check).fallback(gateway_handler))
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(build_cors_layer(&config.cors)),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.gateway.routes().routes().len(),
            public_routes = self.config.public_routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                notified(shutdown).await;
                tracing::info!("Shutdown signal received, draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn gateway(&self) -> Arc<Gateway> {
        self.gateway.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    service: &'static str,
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: "api-gateway",
    })
}

/// Catch-all handler: everything except `/health` goes through the gateway.
async fn gateway_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = InboundRequest::new(method, uri, headers, body);
    match state.gateway.handle(request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
