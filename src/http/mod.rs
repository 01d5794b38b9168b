//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, CORS, body limit)
//!     → request.rs (InboundRequest: method, uri, headers, body)
//!     → handler.rs (classify → authenticate → route)
//!     → forward.rs (exchange with the backend)
//!     → response.rs (map failures to status codes)
//!     → Send to client
//! ```

pub mod cors;
pub mod forward;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, Forwarder};
pub use handler::Gateway;
pub use request::{InboundRequest, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::GatewayError;
pub use server::GatewayServer;
