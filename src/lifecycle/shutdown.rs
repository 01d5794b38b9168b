//! Graceful shutdown fan-out.
//!
//! One `Shutdown` is created in `main` (or per test); the HTTP server holds
//! a receiver and stops accepting once it fires. Requests already inside the
//! gateway run to completion, backend call included.

use tokio::sync::broadcast;

/// Sender side of the shutdown broadcast. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Subscribers created afterwards never see it.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Servers still waiting on the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when `rx` is triggered, or when every `Shutdown` has been dropped.
pub async fn notified(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
