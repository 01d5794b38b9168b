//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config <file.toml> (optional; platform defaults otherwise)
//!     → loader.rs (toml → GatewayConfig)
//!     → loader.rs (*_SERVICE_URL, JWT_*, GATEWAY_BIND_ADDRESS overrides)
//!     → validation.rs (every problem reported at once)
//!     → Gateway: route table, public list, verifier, forwarder
//! ```
//!
//! # Design Decisions
//! - Loaded once at startup; a change means a restart
//! - Every section has defaults, so an empty file is a valid config

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, RouteConfig,
    SecurityConfig, ServiceConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
