//! Record store boundary
//!
//! The hosted database seen from the core: named collections of JSON
//! records keyed by a string `id` field, with equality filters, one
//! order-by, and count queries. The real backend lives outside this
//! crate; `MemoryRecordStore` is the in-process implementation used for
//! tests and local development.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

use super::{StorageError, StorageHandle};

/// Sort direction for an order-by clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A list/count query: equality filters plus an optional order-by
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, Value)>,
    order_by: Option<(String, SortOrder)>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    /// Require `field == value`
    pub fn filter(mut self, field: impl Into<String>, value: Value) -> Query {
        self.filters.push((field.into(), value));
        self
    }

    /// Order results by a field
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Query {
        self.order_by = Some((field.into(), order));
        self
    }

    /// Check a record against the equality filters
    pub fn matches(&self, record: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }

    /// Sort records per the order-by clause (stable; no-op without one)
    pub fn sort(&self, records: &mut [Value]) {
        let Some((field, order)) = &self.order_by else {
            return;
        };
        records.sort_by(|a, b| {
            let ordering = compare_values(a.get(field), b.get(field));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}

/// Field comparison: numbers numerically, strings lexicographically,
/// missing fields sort first
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            } else if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
                x.cmp(y)
            } else {
                Ordering::Equal
            }
        }
    }
}

/// Collection/record CRUD boundary
///
/// Records are JSON objects carrying a string `id` field; collections
/// are keyed by that id.
pub trait RecordStore {
    /// Records matching the query, in query order
    fn list(&self, collection: &str, query: &Query) -> StorageHandle<Vec<Value>>;
    /// One record by id
    fn get(&self, collection: &str, id: &str) -> StorageHandle<Option<Value>>;
    /// Insert a new record (fails on duplicate id)
    fn insert(&self, collection: &str, record: Value) -> StorageHandle<()>;
    /// Replace the record with the given id (fails when absent)
    fn update(&self, collection: &str, id: &str, record: Value) -> StorageHandle<()>;
    /// Delete by id (missing ids are OK)
    fn delete(&self, collection: &str, id: &str) -> StorageHandle<()>;
    /// Number of records matching the query
    fn count(&self, collection: &str, query: &Query) -> StorageHandle<usize>;
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// In-memory record store
///
/// Single-threaded like the rest of the editor; operations complete
/// immediately.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    collections: RefCell<HashMap<String, Vec<Value>>>,
}

impl MemoryRecordStore {
    pub fn new() -> MemoryRecordStore {
        MemoryRecordStore::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn list(&self, collection: &str, query: &Query) -> StorageHandle<Vec<Value>> {
        let collections = self.collections.borrow();
        let mut records: Vec<Value> = collections
            .get(collection)
            .map(|records| records.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();
        query.sort(&mut records);
        StorageHandle::ready(records)
    }

    fn get(&self, collection: &str, id: &str) -> StorageHandle<Option<Value>> {
        let collections = self.collections.borrow();
        let record = collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned();
        StorageHandle::ready(record)
    }

    fn insert(&self, collection: &str, record: Value) -> StorageHandle<()> {
        let Some(id) = record_id(&record).map(str::to_string) else {
            return StorageHandle::error(StorageError::Other(
                "record has no string id field".to_string(),
            ));
        };

        let mut collections = self.collections.borrow_mut();
        let records = collections.entry(collection.to_string()).or_default();
        if records.iter().any(|r| record_id(r) == Some(id.as_str())) {
            return StorageHandle::error(StorageError::Other(format!(
                "duplicate id '{}' in collection '{}'",
                id, collection
            )));
        }
        records.push(record);
        StorageHandle::ready(())
    }

    fn update(&self, collection: &str, id: &str, record: Value) -> StorageHandle<()> {
        let mut collections = self.collections.borrow_mut();
        let Some(records) = collections.get_mut(collection) else {
            return StorageHandle::error(StorageError::NotFound(format!(
                "collection '{}'",
                collection
            )));
        };
        match records.iter_mut().find(|r| record_id(r) == Some(id)) {
            Some(slot) => {
                *slot = record;
                StorageHandle::ready(())
            }
            None => StorageHandle::error(StorageError::NotFound(format!(
                "record '{}' in collection '{}'",
                id, collection
            ))),
        }
    }

    fn delete(&self, collection: &str, id: &str) -> StorageHandle<()> {
        let mut collections = self.collections.borrow_mut();
        if let Some(records) = collections.get_mut(collection) {
            records.retain(|r| record_id(r) != Some(id));
        }
        StorageHandle::ready(())
    }

    fn count(&self, collection: &str, query: &Query) -> StorageHandle<usize> {
        let collections = self.collections.borrow();
        let count = collections
            .get(collection)
            .map(|records| records.iter().filter(|r| query.matches(r)).count())
            .unwrap_or(0);
        StorageHandle::ready(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with_games() -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        for (id, title, updated, published) in [
            ("g1", "Alpha", 100, false),
            ("g2", "Beta", 300, true),
            ("g3", "Gamma", 200, true),
        ] {
            store
                .insert(
                    "games",
                    json!({ "id": id, "title": title, "updatedAt": updated, "isPublished": published }),
                )
                .take()
                .unwrap()
                .unwrap();
        }
        store
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let store = store_with_games();
        let record = store.get("games", "g2").take().unwrap().unwrap().unwrap();
        assert_eq!(record["title"], json!("Beta"));

        let missing = store.get("games", "nope").take().unwrap().unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = store_with_games();
        let result = store
            .insert("games", json!({ "id": "g1", "title": "Clone" }))
            .take()
            .unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_equality_filter_and_count() {
        let store = store_with_games();
        let query = Query::new().filter("isPublished", json!(true));

        let published = store.list("games", &query).take().unwrap().unwrap();
        assert_eq!(published.len(), 2);

        let count = store.count("games", &query).take().unwrap().unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_order_by_descending() {
        let store = store_with_games();
        let query = Query::new().order_by("updatedAt", SortOrder::Descending);

        let records = store.list("games", &query).take().unwrap().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("g2"), json!("g3"), json!("g1")]);
    }

    #[test]
    fn test_update_replaces_record() {
        let store = store_with_games();
        store
            .update("games", "g1", json!({ "id": "g1", "title": "Alpha 2" }))
            .take()
            .unwrap()
            .unwrap();

        let record = store.get("games", "g1").take().unwrap().unwrap().unwrap();
        assert_eq!(record["title"], json!("Alpha 2"));

        let result = store
            .update("games", "missing", json!({ "id": "missing" }))
            .take()
            .unwrap();
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = store_with_games();
        store.delete("games", "g1").take().unwrap().unwrap();
        store.delete("games", "g1").take().unwrap().unwrap();

        let count = store.count("games", &Query::new()).take().unwrap().unwrap();
        assert_eq!(count, 2);
    }
}
