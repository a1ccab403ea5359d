//! Whole-path snapshots and typed decoding

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{DeliveryPartner, Order, Restaurant};

use super::StorePath;
use crate::utils::{AppError, AppResult};

/// Records whose identifier may live only in the store key
pub trait KeyedRecord: DeserializeOwned {
    /// Fill the record id from its key when the record carries none
    fn assign_key(&mut self, key: &str);
}

impl KeyedRecord for Order {
    fn assign_key(&mut self, key: &str) {
        if self.id.is_empty() {
            self.id = key.to_string();
        }
    }
}

impl KeyedRecord for Restaurant {
    fn assign_key(&mut self, key: &str) {
        if self.id.is_empty() {
            self.id = key.to_string();
        }
    }
}

impl KeyedRecord for DeliveryPartner {
    fn assign_key(&mut self, key: &str) {
        if self.id.is_empty() {
            self.id = key.to_string();
        }
    }
}

/// Value of one path at one moment; `None` when nothing is stored there
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    path: StorePath,
    value: Option<Value>,
}

impl Snapshot {
    pub fn new(path: StorePath, value: Option<Value>) -> Self {
        let value = value.filter(|v| !v.is_null());
        Self { path, value }
    }

    pub fn empty(path: StorePath) -> Self {
        Self { path, value: None }
    }

    pub fn path(&self) -> &StorePath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        match &self.value {
            Some(Value::Object(map)) => map.len(),
            Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).count(),
            Some(_) => 1,
            None => 0,
        }
    }

    /// Decode a keyed collection. Records that fail to decode are skipped.
    pub fn records<T: KeyedRecord>(&self) -> Vec<T> {
        let entries: Vec<(String, &Value)> = match &self.value {
            Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        };

        entries
            .into_iter()
            .filter_map(|(key, raw)| match T::deserialize(raw) {
                Ok(mut record) => {
                    record.assign_key(&key);
                    Some(record)
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path,
                        key = %key,
                        error = %e,
                        "Skipping malformed record"
                    );
                    None
                }
            })
            .collect()
    }

    /// Decode the snapshot as a single record
    pub fn record<T: DeserializeOwned>(&self) -> AppResult<Option<T>> {
        match &self.value {
            Some(raw) => T::deserialize(raw).map(Some).map_err(|e| {
                AppError::decode(format!("Failed to decode {}: {}", self.path, e))
                    .with_detail("path", self.path.as_str())
            }),
            None => Ok(None),
        }
    }
}
