//! Error responses.
//!
//! # Responsibilities
//! - Collect component failures into one boundary error type
//! - Map each failure to its HTTP status code
//! - Render a short `{"detail": ...}` body
//!
//! # Design Decisions
//! - Status codes are decided here and nowhere else
//! - Successful backend responses never pass through this module

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::http::forward::ForwardError;
use crate::routing::RouteError;

/// Any terminal failure of the gateway pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Auth(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Route(RouteError::NotFound { .. }) => StatusCode::NOT_FOUND,
            GatewayError::Forward(ForwardError::Unreachable { .. }) => StatusCode::BAD_GATEWAY,
            GatewayError::Forward(ForwardError::Unavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GatewayError::Forward(ForwardError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
