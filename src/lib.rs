//! E-commerce API gateway library.
//!
//! Single ingress for the auth, product, order and payment services:
//! prefix routing, bearer token enforcement on protected paths, and
//! transparent forwarding with backend failures translated to 502/503/504.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::{Gateway, GatewayServer};
pub use lifecycle::Shutdown;
