//! In-process record store
//!
//! Holds the whole tree as one JSON value. Used by the report binary (loaded
//! from a JSON export) and by tests.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::{RecordStore, Snapshot, SnapshotCallback, StorePath, Subscription};
use crate::utils::{AppError, AppResult, ErrorCode};

struct Subscriber {
    path: StorePath,
    callback: SnapshotCallback,
}

struct Inner {
    tree: RwLock<Value>,
    subscribers: DashMap<u64, Subscriber>,
    next_id: AtomicU64,
}

/// Record store backed by an in-memory JSON tree
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }

    /// Seed the store with a full tree (e.g. a database export)
    pub fn from_value(root: Value) -> Self {
        let root = match root {
            Value::Object(_) => root,
            _ => Value::Object(Map::new()),
        };
        Self {
            inner: Arc::new(Inner {
                tree: RwLock::new(root),
                subscribers: DashMap::new(),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Load a JSON export file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_message(
                ErrorCode::SnapshotLoadFailed,
                format!("Failed to read {}: {}", path.display(), e),
            )
        })?;
        let root: Value = serde_json::from_str(&content).map_err(|e| {
            AppError::with_message(
                ErrorCode::SnapshotLoadFailed,
                format!("Failed to parse {}: {}", path.display(), e),
            )
        })?;
        if !root.is_object() {
            return Err(AppError::with_message(
                ErrorCode::SnapshotLoadFailed,
                format!("{} does not contain a JSON object", path.display()),
            ));
        }
        tracing::info!(file = %path.display(), "Loaded store export");
        Ok(Self::from_value(root))
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    fn read(&self, path: &StorePath) -> Snapshot {
        let tree = self.inner.tree.read();
        let mut node = &*tree;
        for segment in path.segments() {
            match node.get(segment) {
                Some(child) => node = child,
                None => return Snapshot::empty(path.clone()),
            }
        }
        Snapshot::new(path.clone(), Some(node.clone()))
    }

    fn write(&self, path: &StorePath, value: Value) {
        {
            let mut tree = self.inner.tree.write();
            write_at(&mut tree, &path.segments().collect::<Vec<_>>(), value);
        }
        self.notify(path);
    }

    /// Deliver fresh snapshots to every subscriber overlapping `changed`.
    /// Callbacks run without any store lock held, so they may write back.
    fn notify(&self, changed: &StorePath) {
        let targets: Vec<(StorePath, SnapshotCallback)> = self
            .inner
            .subscribers
            .iter()
            .filter(|entry| entry.path.overlaps(changed))
            .map(|entry| (entry.path.clone(), entry.callback.clone()))
            .collect();

        tracing::trace!(path = %changed, listeners = targets.len(), "Store changed");

        for (path, callback) in targets {
            let snapshot = self.read(&path);
            callback(&snapshot);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `value` at `segments`, creating parents as needed. `null` deletes
/// and prunes parents left empty.
fn write_at(node: &mut Value, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    if !node.is_object() {
        if value.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }
    let Some(map) = node.as_object_mut() else {
        return;
    };

    if rest.is_empty() {
        if value.is_null() {
            map.remove(*first);
        } else {
            map.insert((*first).to_string(), value);
        }
        return;
    }

    if value.is_null() && !map.contains_key(*first) {
        return;
    }
    let child = map
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    write_at(child, rest, value);

    let empty = match child {
        Value::Object(m) => m.is_empty(),
        Value::Null => true,
        _ => false,
    };
    if empty {
        map.remove(*first);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn subscribe(&self, path: &StorePath, callback: SnapshotCallback) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.insert(
            id,
            Subscriber {
                path: path.clone(),
                callback: callback.clone(),
            },
        );
        tracing::debug!(subscription = id, path = %path, "Subscribed");

        callback(&self.read(path));

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        Subscription::new(id, path.clone(), move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.remove(&id);
            }
        })
    }

    async fn fetch_once(&self, path: &StorePath) -> AppResult<Snapshot> {
        Ok(self.read(path))
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        // All keys are checked before anything is written
        if let Some(bad) = fields.keys().find(|k| k.is_empty() || k.contains('/')) {
            return Err(AppError::invalid_path(format!("{}/{}", path, bad)));
        }
        {
            let mut tree = self.inner.tree.write();
            let base: Vec<&str> = path.segments().collect();
            for (key, value) in fields {
                let mut segments = base.clone();
                segments.push(&key);
                write_at(&mut tree, &segments, value);
            }
        }
        self.notify(path);
        Ok(())
    }

    async fn set(&self, path: &StorePath, value: Value) -> AppResult<()> {
        self.write(path, value);
        Ok(())
    }
}
