//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → matcher.rs (PublicRoutes: may this path skip authentication?)
//!     → router.rs (RouteTable: which service owns this path?)
//!     → &Route with the service's base URL, or RouteError::NotFound
//!
//! At startup:
//!     RouteConfig[] + ServiceConfig[]
//!     → service names resolved to base URLs
//!     → RouteTable kept in declaration order
//! ```
//!
//! # Design Decisions
//! - Plain byte-wise prefix checks, no regex or path normalization
//! - Declaration order decides; validation rejects routes that could never match
//! - Tables are read-only after startup and shared without locks

pub mod matcher;
pub mod router;

pub use matcher::{PathPrefixMatcher, PublicRoutes};
pub use router::{Route, RouteError, RouteTable};
