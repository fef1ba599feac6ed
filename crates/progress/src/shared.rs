//! Shared handle for hosting the service in async code.

use std::sync::Arc;
use learnpath_storage::{LedgerStore, MemoryStore};
use tokio::sync::Mutex;

use crate::service::ProgressService;

/// Cloneable handle to one [`ProgressService`].
///
/// Every call takes the lock once and runs a synchronous closure under it,
/// making each ledger operation a single critical section.
pub struct SharedLedger<S: LedgerStore = MemoryStore> {
    inner: Arc<Mutex<ProgressService<S>>>,
}

impl<S: LedgerStore> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LedgerStore> SharedLedger<S> {
    /// Wrap a service.
    pub fn new(service: ProgressService<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run one operation with exclusive access.
    pub async fn with<R>(&self, op: impl FnOnce(&mut ProgressService<S>) -> R) -> R {
        let mut guard = self.inner.lock().await;
        op(&mut guard)
    }

    /// Run one read-only operation.
    pub async fn read<R>(&self, op: impl FnOnce(&ProgressService<S>) -> R) -> R {
        let guard = self.inner.lock().await;
        op(&guard)
    }
}

impl Default for SharedLedger<MemoryStore> {
    fn default() -> Self {
        Self::new(ProgressService::default())
    }
}
