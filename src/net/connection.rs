//! In-flight forward tracking.
//!
//! # Responsibilities
//! - Generate unique IDs for forwarded exchanges for tracing
//! - Count backend calls currently in flight
//! - Detect calls abandoned because the client went away
//!
//! A forward that is dropped before it completes means the server dropped
//! the handler future (client disconnect). Dropping the future also drops
//! the pending backend request and its connection; the guard records it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::observability::metrics;

/// Global atomic counter for forward IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static FORWARD_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one forwarded exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForwardId(u64);

impl ForwardId {
    /// Generate a new unique forward ID.
    pub fn new() -> Self {
        Self(FORWARD_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ForwardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ForwardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fwd-{}", self.0)
    }
}

/// Tracks backend calls in flight and how many were abandoned.
#[derive(Debug, Clone, Default)]
pub struct InFlightTracker {
    active: Arc<AtomicU64>,
    cancelled: Arc<AtomicU64>,
}

impl InFlightTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new backend call. Returns a guard that decrements on drop.
    pub fn track(&self, service: &str) -> InFlightGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        metrics::inflight_started();
        InFlightGuard {
            active: Arc::clone(&self.active),
            cancelled: Arc::clone(&self.cancelled),
            id: ForwardId::new(),
            service: service.to_string(),
            completed: false,
        }
    }

    /// Get current in-flight call count.
    pub fn active_count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Calls dropped before they finished.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Guard that tracks one backend call's lifetime.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicU64>,
    cancelled: Arc<AtomicU64>,
    id: ForwardId,
    service: String,
    completed: bool,
}

impl InFlightGuard {
    /// Get this call's ID.
    pub fn id(&self) -> ForwardId {
        self.id
    }

    /// Mark the call finished (successfully or not) and release it.
    pub fn complete(mut self) {
        self.completed = true;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        metrics::inflight_finished();
        if !self.completed {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
            metrics::record_forward_cancelled(&self.service);
            tracing::warn!(
                forward_id = %self.id,
                service = %self.service,
                "Client went away, backend call cancelled"
            );
        }
    }
}
