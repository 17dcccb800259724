//! View-Model Scope
//!
//! Ties async work to the lifetime of its owner. Closing the scope cancels
//! in-flight tasks, so results arriving afterwards are never published.
//!
//! Uses tokio-util's `TaskTracker` for task lifecycle management and
//! `CancellationToken` for async-native cancellation.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

/// Cancellation scope for a view-model
///
/// Clones share the same token and tracker.
#[derive(Clone, Debug, Default)]
pub struct ViewModelScope {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl ViewModelScope {
    /// Create an open scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scope was closed
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Close the scope and cancel every task spawned on it
    pub fn close(&self) {
        if !self.token.is_cancelled() {
            debug!(active_tasks = self.tracker.len(), "closing view-model scope");
        }
        self.token.cancel();
        self.tracker.close();
    }

    /// Run `future` unless the scope closes first
    ///
    /// # Returns
    /// `None` when the scope closed before `future` completed
    pub async fn run<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            output = future => Some(output),
        }
    }

    /// Spawn `future` on the runtime, cancelled when the scope closes
    ///
    /// Returns `None` without spawning when the scope is already closed.
    pub fn spawn<F>(&self, future: F) -> Option<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_closed() {
            debug!("spawn rejected: scope closed");
            return None;
        }

        let token = self.token.clone();
        Some(self.tracker.spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => debug!("scoped task cancelled"),
                () = future => {}
            }
        }))
    }

    /// Number of tasks still running on this scope
    pub fn active_tasks(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for every spawned task to finish
    ///
    /// An open scope stays open afterwards.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        if !self.is_closed() {
            self.tracker.reopen();
        }
    }
}
