//! Decoded bearer token payload.

use serde::{Deserialize, Serialize};

/// Claims carried by tokens the auth service issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// Role string (`user`, `staff`, `admin`).
    pub role: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}
