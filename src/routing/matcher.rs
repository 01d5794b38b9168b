//! Path prefix matching.
//!
//! # Responsibilities
//! - Match request paths against a configured prefix
//! - Classify paths as public (authentication exempt) or protected
//!
//! # Design Decisions
//! - Path matching is byte-wise and case-sensitive
//! - No normalization: `/api/v1/products` also matches `/api/v1/productsX`
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if `path` starts with this prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Ordered list of prefixes that bypass authentication.
#[derive(Debug, Clone, Default)]
pub struct PublicRoutes {
    matchers: Vec<PathPrefixMatcher>,
}

impl PublicRoutes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matchers: prefixes.into_iter().map(PathPrefixMatcher::new).collect(),
        }
    }

    /// Returns true on the first prefix that matches `path`.
    pub fn is_public(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
