//! In-memory store
//!
//! Backing implementation for tests and local development. Rows live in
//! per-entity vectors in insertion order. A one-shot failure can be
//! injected to exercise the caller's retry path.

use super::{Entity, Filter, Order, Store, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use shared::error::StoreError;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    tables: DashMap<&'static str, Vec<Value>>,
    fail_next: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with `err` (consumed once).
    pub fn fail_next_with(&self, err: StoreError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    fn take_injected_failure(&self) -> Option<StoreError> {
        self.fail_next.lock().unwrap().take()
    }

    fn row_id(record: &Value) -> StoreResult<String> {
        record
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| StoreError::Backend("record carries no id".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, entity: Entity, record: Value) -> StoreResult<Value> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        Self::row_id(&record)?;
        self.tables
            .entry(entity.table())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, entity: Entity, id: &str, fields: Value) -> StoreResult<()> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let Value::Object(fields) = fields else {
            return Err(StoreError::Backend("update fields must be an object".into()));
        };
        let mut rows = self.tables.entry(entity.table()).or_default();
        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("{entity} {id}")))?;
        if let Value::Object(existing) = row {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, entity: Entity, id: &str) -> StoreResult<()> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut rows = self.tables.entry(entity.table()).or_default();
        let before = rows.len();
        rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
        if rows.len() == before {
            return Err(StoreError::NotFound(format!("{entity} {id}")));
        }
        Ok(())
    }

    async fn query(&self, entity: Entity, filter: Filter, order: Order) -> StoreResult<Vec<Value>> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut rows: Vec<Value> = self
            .tables
            .get(entity.table())
            .map(|rows| rows.iter().filter(|row| filter.matches(row)).cloned().collect())
            .unwrap_or_default();
        order.apply(&mut rows);
        Ok(rows)
    }
}
