//! Record store seam
//!
//! The console reads and writes a single hierarchical key-value store. This
//! module defines the contract the rest of the crate depends on:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 RecordStore                   │
//! │  subscribe(path, cb) ──▶ Subscription         │
//! │  fetch_once(path)    ──▶ Snapshot             │
//! │  update / set / remove                        │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!              ┌─────────┴─────────┐
//!              ▼                   ▼
//!         MemoryStore        (remote backend)
//! ```
//!
//! Subscriptions deliver whole-path snapshots, never deltas.

mod memory;
mod path;
mod snapshot;

pub use memory::MemoryStore;
pub use path::StorePath;
pub use snapshot::{KeyedRecord, Snapshot};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::utils::AppResult;

/// Callback invoked with every snapshot of a subscribed path
pub type SnapshotCallback = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Hierarchical record store with live subscriptions
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Register a callback for `path`.
    ///
    /// The callback receives the current snapshot immediately, then a fresh
    /// snapshot after every write that touches `path` or anything below it.
    fn subscribe(&self, path: &StorePath, callback: SnapshotCallback) -> Subscription;

    /// Read `path` once
    async fn fetch_once(&self, path: &StorePath) -> AppResult<Snapshot>;

    /// Merge top-level fields into the record at `path`. A `null` field
    /// deletes that field.
    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> AppResult<()>;

    /// Replace the value at `path`. Writing `null` removes it.
    async fn set(&self, path: &StorePath, value: Value) -> AppResult<()>;

    /// Remove the value at `path`
    async fn remove(&self, path: &StorePath) -> AppResult<()> {
        self.set(path, Value::Null).await
    }
}

/// Handle to a live subscription. Dropping it unregisters the callback.
pub struct Subscription {
    id: u64,
    path: StorePath,
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(id: u64, path: StorePath, cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            id,
            path,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unregister now instead of on drop
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
            tracing::debug!(subscription = self.id, path = %self.path, "Subscription cancelled");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
