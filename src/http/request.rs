//! Inbound request representation and request IDs.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Hold the parts of a request the gateway needs to classify, route and forward it
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing, and forwarded to
//!   backends with the rest of the headers
//! - Body is buffered once (bounded by `security.max_body_size`) and
//!   forwarded byte-for-byte

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// A request as received from the client, owned by one handler invocation.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl InboundRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Path plus `?query` if present; what gets appended to the target base URL.
    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| self.uri.path())
    }

    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.headers.get(header::AUTHORIZATION)
    }

    pub fn request_id(&self) -> &str {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> InboundRequest {
        InboundRequest::new(
            Method::GET,
            uri.parse().unwrap(),
            HeaderMap::new(),
            Bytes::new(),
        )
    }

    #[test]
    fn path_and_query_keeps_query() {
        let req = request("/api/v1/products?page=2&q=shoe%20rack");
        assert_eq!(req.path(), "/api/v1/products");
        assert_eq!(req.path_and_query(), "/api/v1/products?page=2&q=shoe%20rack");
    }

    #[test]
    fn absolute_uri_uses_path_only() {
        let req = request("http://gateway.local/api/v1/cart");
        assert_eq!(req.path_and_query(), "/api/v1/cart");
    }

    #[test]
    fn request_id_defaults_to_unknown() {
        let mut req = request("/");
        assert_eq!(req.request_id(), "unknown");
        req.headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(req.request_id(), "abc");
    }

    #[test]
    fn generated_request_ids_are_uuids() {
        let req = Request::new(());
        let id = MakeRequestUuidV4.make_request_id(&req).unwrap();
        let raw = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(raw).is_ok());
    }
}
