//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Protected request
//!     → verifier.rs (Bearer prefix, signature, expiry)
//!     → claims.rs (sub, role, exp)
//!     → Claims recorded on the request span; raw header forwarded unchanged
//! ```
//!
//! # Design Decisions
//! - The gateway never mints tokens; the auth service does
//! - Backends re-verify the same token with the same shared secret
//! - Failure detail is deliberately coarse (two kinds, both 401)

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::{AuthError, Authenticator, TokenVerifier, BEARER_PREFIX};
