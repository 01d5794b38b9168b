//! Bearer token verification.
//!
//! # Responsibilities
//! - Extract the token from an `Authorization: Bearer <token>` header
//! - Verify the HMAC signature against the shared secret
//! - Check expiry against the current time
//!
//! # Design Decisions
//! - Stateless: no revocation list, no refresh, no caching of results
//! - Callers only ever see two failure kinds; the underlying
//!   decode error is logged at debug level and discarded

use std::fmt;

use axum::http::HeaderValue;
use jsonwebtoken::{decode, DecodingKey, Validation};
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::config::AuthConfig;

/// Literal prefix expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Authentication failure. Both variants surface as 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing or invalid authorization header")]
    MissingOrMalformed,

    #[error("Invalid or expired token")]
    InvalidOrExpired,
}

impl AuthError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingOrMalformed => "missing_or_malformed",
            AuthError::InvalidOrExpired => "invalid_or_expired",
        }
    }
}

/// Decides whether a request carries acceptable credentials.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, authorization: Option<&HeaderValue>) -> Result<Claims, AuthError>;
}

/// HMAC JWT verifier built from [`AuthConfig`].
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify a raw `Authorization` header value.
    pub fn verify(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingOrMalformed)?;

        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidOrExpired
            })
    }
}

impl Authenticator for TokenVerifier {
    fn authenticate(&self, authorization: Option<&HeaderValue>) -> Result<Claims, AuthError> {
        match authorization {
            Some(value) => {
                let value = value.to_str().map_err(|_| AuthError::MissingOrMalformed)?;
                self.verify(Some(value))
            }
            None => self.verify(None),
        }
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}
