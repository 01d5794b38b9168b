//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! main.rs:
//!     load_config → init logging/metrics → bind listener → GatewayServer::run
//!
//! signals.rs:
//!     SIGINT | SIGTERM → Shutdown::trigger
//!
//! shutdown.rs:
//!     broadcast → axum graceful shutdown → in-flight requests finish → exit
//! ```
//!
//! # Design Decisions
//! - Any startup error is fatal; there is no degraded mode
//! - Tests drive the same broadcast instead of sending signals

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::{spawn_signal_handler, wait_for_signal};
