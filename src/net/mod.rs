//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Routed request
//!     → connection.rs (track the backend call, assign forward ID)
//!     → http::forward (exchange with the backend)
//!     → guard completed, or dropped if the client disconnected first
//! ```
//!
//! # Design Decisions
//! - Each backend call tracked so cancellation is observable
//! - Connection accept and limits are left to axum/hyper

pub mod connection;

pub use connection::{ForwardId, InFlightGuard, InFlightTracker};
