//! Persistence collaborator
//!
//! The hosted backend is an external service behind the [`Store`]
//! trait: four verbs over named entities, with failures reported as
//! [`StoreError`] kinds the core never looks past. Services go through
//! [`StoreHandle`], which applies the configured per-call timeout and a
//! single retry on transient failures, never on validation or
//! authorization failures, which are raised before any store call.

pub mod memory;


pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppError, AppResult, StoreError};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// The tables the console persists to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Stalls,
    Products,
    Bills,
    SalesReturns,
    Registrations,
    Payments,
    Panchayaths,
    Wards,
    EnquiryFields,
    Enquiries,
    SurveyShares,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Stalls => "stalls",
            Self::Products => "products",
            Self::Bills => "billing_transactions",
            Self::SalesReturns => "sales_returns",
            Self::Registrations => "registrations",
            Self::Payments => "payments",
            Self::Panchayaths => "panchayaths",
            Self::Wards => "wards",
            Self::EnquiryFields => "enquiry_fields",
            Self::Enquiries => "enquiries",
            Self::SurveyShares => "survey_shares",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Conjunction of field = value matches.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Match every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Single equality clause.
    pub fn eq(field: impl Into<String>, value: impl Serialize) -> Self {
        Self::all().and(field, value)
    }

    /// Add another equality clause.
    pub fn and(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.clauses.push((field.into(), value));
        self
    }

    /// Whether a row satisfies every clause.
    pub fn matches(&self, row: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| row.get(field) == Some(value))
    }
}

/// Single-field ordering applied by `query`.
#[derive(Debug, Clone, Default)]
pub struct Order {
    by: Option<(String, bool)>,
}

impl Order {
    /// Leave rows in insertion order.
    pub fn unordered() -> Self {
        Self::default()
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            by: Some((field.into(), false)),
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            by: Some((field.into(), true)),
        }
    }

    /// Sort rows in place by the configured field.
    pub fn apply(&self, rows: &mut [Value]) {
        let Some((field, descending)) = &self.by else {
            return;
        };
        rows.sort_by(|a, b| {
            let ord = compare_values(a.get(field), b.get(field));
            if *descending { ord.reverse() } else { ord }
        });
    }
}

/// Compare two JSON field values: numbers numerically, everything else
/// by string form, missing values last.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => json_text(x).cmp(&json_text(y)),
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Result alias for store implementations.
pub type StoreResult<T> = Result<T, StoreError>;

/// External persistence contract.
///
/// Records are JSON objects carrying their own `id`; the core generates
/// ids and unique numbers, the store only persists them.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new record, returning it as stored.
    async fn insert(&self, entity: Entity, record: Value) -> StoreResult<Value>;

    /// Merge `fields` into the record with the given id.
    async fn update(&self, entity: Entity, id: &str, fields: Value) -> StoreResult<()>;

    /// Remove the record with the given id.
    async fn delete(&self, entity: Entity, id: &str) -> StoreResult<()>;

    /// Fetch all records matching `filter`, sorted by `order`.
    async fn query(&self, entity: Entity, filter: Filter, order: Order) -> StoreResult<Vec<Value>>;
}

/// Shared store access with the timeout/retry policy applied.
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<dyn Store>,
    timeout_ms: u64,
}

impl StoreHandle {
    pub fn new(store: Arc<dyn Store>, timeout_ms: u64) -> Self {
        Self { store, timeout_ms }
    }

    pub async fn insert(&self, entity: Entity, record: Value) -> StoreResult<Value> {
        self.with_retry(|| self.store.insert(entity, record.clone()))
            .await
    }

    pub async fn update(&self, entity: Entity, id: &str, fields: Value) -> StoreResult<()> {
        self.with_retry(|| self.store.update(entity, id, fields.clone()))
            .await
    }

    pub async fn delete(&self, entity: Entity, id: &str) -> StoreResult<()> {
        self.with_retry(|| self.store.delete(entity, id)).await
    }

    pub async fn query(&self, entity: Entity, filter: Filter, order: Order) -> StoreResult<Vec<Value>> {
        self.with_retry(|| self.store.query(entity, filter.clone(), order.clone()))
            .await
    }

    // ── Typed helpers ───────────────────────────────────────────────

    /// Serialize and insert a model.
    pub async fn insert_model<T: Serialize>(&self, entity: Entity, model: &T) -> AppResult<()> {
        let record = serde_json::to_value(model)
            .map_err(|e| StoreError::Backend(format!("serialize {entity}: {e}")))?;
        self.insert(entity, record).await?;
        Ok(())
    }

    /// Fetch all rows matching `filter`, deserialized into `T`.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        entity: Entity,
        filter: Filter,
        order: Order,
    ) -> AppResult<Vec<T>> {
        let rows = self.query(entity, filter, order).await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| StoreError::Backend(format!("deserialize {entity}: {e}")).into())
            })
            .collect()
    }

    /// Fetch one row by id; `NotFound` when the id no longer exists.
    pub async fn fetch_by_id<T: DeserializeOwned>(&self, entity: Entity, id: &str) -> AppResult<T> {
        let mut rows: Vec<T> = self
            .fetch_all(entity, Filter::eq("id", id), Order::unordered())
            .await?;
        rows.pop()
            .ok_or_else(|| AppError::not_found(format!("{entity} {id}")))
    }

    /// Run a store call with the configured timeout, retrying once if
    /// the failure was transient.
    async fn with_retry<T, F, Fut>(&self, op: F) -> StoreResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        match self.bounded(op()).await {
            Err(err) if err.is_transient() => {
                tracing::warn!(error = %err, "transient store failure, retrying once");
                self.bounded(op()).await
            }
            other => other,
        }
    }

    async fn bounded<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        tokio::time::timeout(Duration::from_millis(self.timeout_ms), fut)
            .await
            .unwrap_or(Err(StoreError::Timeout(self.timeout_ms)))
    }
}
