use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use super::query::{Filter, OrderBy};
use crate::errors::StorageError;
use instep_core::utils::time_utils::now_millis;

/// A stored document: a flat JSON object.
pub type DocumentData = serde_json::Map<String, Value>;

/// Per-field write instruction. A write is a list of `(field, WriteField)`
/// pairs, letting plain values and field transforms travel together.
#[derive(Debug, Clone)]
pub enum WriteField {
    /// Store the value as given.
    Value(Value),
    /// Resolve to the store's clock (epoch milliseconds) at apply time.
    ServerTimestamp,
    /// Atomic numeric add; a missing or non-numeric field counts as 0.
    Increment(i64),
    /// Append the items that are not already present, preserving order.
    ArrayUnion(Vec<Value>),
}

impl WriteField {
    pub fn value(value: impl Into<Value>) -> Self {
        WriteField::Value(value.into())
    }

    pub fn increment(delta: i64) -> Self {
        WriteField::Increment(delta)
    }

    pub fn array_union(items: Vec<Value>) -> Self {
        WriteField::ArrayUnion(items)
    }
}

/// Convenience constructor for a named write field.
pub fn field(name: &str, write: WriteField) -> (String, WriteField) {
    (name.to_string(), write)
}

/// The in-process document store.
///
/// Collections are created lazily on first write. Each write locks its
/// collection, so field transforms (increments in particular) never lose
/// an update; sequences of reads and writes across calls are not atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, BTreeMap<String, DocumentData>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches a document by id.
    pub fn get(&self, collection: &str, id: &str) -> Option<DocumentData> {
        self.collections.get(collection)?.get(id).cloned()
    }

    /// Creates a document under a fresh random id and returns the id.
    pub fn add(&self, collection: &str, fields: Vec<(String, WriteField)>) -> String {
        let id = Uuid::new_v4().to_string();
        self.set(collection, &id, fields, false);
        id
    }

    /// Writes a document. With `merge` the fields are applied over the
    /// existing document (creating it when absent); without, the document
    /// is replaced.
    pub fn set(&self, collection: &str, id: &str, fields: Vec<(String, WriteField)>, merge: bool) {
        let mut entry = self.collections.entry(collection.to_string()).or_default();
        let base = if merge {
            entry.get(id).cloned().unwrap_or_default()
        } else {
            DocumentData::new()
        };
        entry.insert(id.to_string(), apply_fields(base, fields));
    }

    /// Merge-writes into an existing document; fails when it is absent.
    pub fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Vec<(String, WriteField)>,
    ) -> Result<(), StorageError> {
        let mut entry = self.collections.entry(collection.to_string()).or_default();
        let existing = entry
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::DocumentNotFound(format!("{collection}/{id}")))?;
        entry.insert(id.to_string(), apply_fields(existing, fields));
        Ok(())
    }

    /// Runs a filtered scan over a collection. All filters must match;
    /// results are sorted by the optional sort key (ties and unsorted
    /// queries keep id order) and truncated to `limit`.
    pub fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order_by: Option<OrderBy>,
        limit: Option<usize>,
    ) -> Vec<(String, DocumentData)> {
        let Some(entry) = self.collections.get(collection) else {
            return Vec::new();
        };

        let mut results: Vec<(String, DocumentData)> = entry
            .iter()
            .filter(|(_, doc)| filters.iter().all(|f| f.matches(doc)))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect();

        if let Some(order) = order_by {
            results.sort_by(|a, b| {
                let va = a.1.get(&order.field).unwrap_or(&Value::Null);
                let vb = b.1.get(&order.field).unwrap_or(&Value::Null);
                order.ordering(va, vb)
            });
        }
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        results
    }
}

fn apply_fields(mut doc: DocumentData, fields: Vec<(String, WriteField)>) -> DocumentData {
    for (key, write) in fields {
        let value = match write {
            WriteField::Value(value) => value,
            WriteField::ServerTimestamp => Value::from(now_millis()),
            WriteField::Increment(delta) => {
                let current = doc.get(&key).and_then(Value::as_i64).unwrap_or(0);
                Value::from(current + delta)
            }
            WriteField::ArrayUnion(items) => {
                let mut array = doc
                    .get(&key)
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                for item in items {
                    if !array.contains(&item) {
                        array.push(item);
                    }
                }
                Value::Array(array)
            }
        };
        doc.insert(key, value);
    }
    doc
}
