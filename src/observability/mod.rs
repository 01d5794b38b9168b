//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request span (handler.rs): request_id, method, path, service, subject
//!     → logging.rs (fmt subscriber on stdout, filtered by RUST_LOG or log_level)
//!
//! Pipeline outcomes (handler.rs, connection.rs):
//!     → metrics.rs (request/auth/forward counters, latency histogram, in-flight gauge)
//!     → Prometheus scrape endpoint, only when metrics_enabled
//! ```
//!
//! # Design Decisions
//! - Credentials and bodies never reach a log line
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
