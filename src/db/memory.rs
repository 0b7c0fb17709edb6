//! In-memory backend for the document store (tests and local runs).

use crate::error::AppError;
use dashmap::{mapref::entry::Entry, DashMap};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Documents keyed by `(collection, id)`, stored as JSON values so they go
/// through the same serde path as Firestore documents.
#[derive(Default)]
pub struct MemoryStore {
    docs: DashMap<(String, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let value = self
            .docs
            .get(&(collection.to_string(), id.to_string()))
            .map(|entry| entry.value().clone());

        value.map(decode).transpose()
    }

    pub fn set<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(doc).map_err(|e| AppError::Database(e.to_string()))?;
        self.docs
            .insert((collection.to_string(), id.to_string()), value);
        Ok(())
    }

    /// Insert only if `id` is unused. The check and insert hold the same shard lock.
    pub fn create<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<bool, AppError> {
        let value = serde_json::to_value(doc).map_err(|e| AppError::Database(e.to_string()))?;
        match self.docs.entry((collection.to_string(), id.to_string())) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(true)
            }
        }
    }

    pub fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.docs.remove(&(collection.to_string(), id.to_string()));
        Ok(())
    }

    pub fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        self.collect(collection, |_| true)
    }

    pub fn find_by_field<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, AppError> {
        self.collect(collection, |doc| {
            doc.get(field).and_then(Value::as_str) == Some(value)
        })
    }

    fn collect<T, F>(&self, collection: &str, predicate: F) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
        F: Fn(&Value) -> bool,
    {
        // Snapshot first so no shard lock is held while decoding.
        let values: Vec<Value> = self
            .docs
            .iter()
            .filter(|entry| entry.key().0 == collection && predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        values.into_iter().map(decode).collect()
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Database(e.to_string()))
}
