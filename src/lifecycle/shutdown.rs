//! Shutdown coordination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Coordinator for cancellation.
///
/// Provides a broadcast channel that long-running tasks subscribe to, plus
/// a flag so late subscribers never miss the signal.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    /// Whether the signal has fired.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Resolve once the signal fires; resolves immediately if it already has.
    pub async fn wait(&self) {
        let mut rx = self.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation scope spanning one supervisor attempt.
///
/// The scope's signal mirrors the parent (process-level) shutdown while the
/// attempt runs, and is released unconditionally when the scope is dropped,
/// whatever the attempt's outcome.
pub struct AttemptScope {
    scope: Shutdown,
    forwarder: Option<JoinHandle<()>>,
}

impl AttemptScope {
    /// Open a scope under `parent`.
    pub fn new(parent: &Shutdown) -> Self {
        let scope = Shutdown::new();
        let mut parent_rx = parent.subscribe();
        let forwarder = tokio::spawn({
            let scope = scope.clone();
            async move {
                let _ = parent_rx.recv().await;
                scope.trigger();
            }
        });
        if parent.is_triggered() {
            scope.trigger();
        }
        Self {
            scope,
            forwarder: Some(forwarder),
        }
    }

    /// Handle to the attempt-scoped signal.
    pub fn handle(&self) -> &Shutdown {
        &self.scope
    }
}

impl Drop for AttemptScope {
    fn drop(&mut self) {
        self.scope.trigger();
        if let Some(task) = self.forwarder.take() {
            task.abort();
        }
    }
}
