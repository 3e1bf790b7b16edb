//! Unified error system
//!
//! Two layers, converted at the service boundary:
//! - [`StoreError`]: failures reported by the persistence collaborator.
//!   The core never inspects a backend cause beyond its kind.
//! - [`AppError`]: the public taxonomy every service operation fails
//!   with: validation, authorization, not-found, persistence. The kind
//!   distinction is preserved all the way to the caller so user-facing
//!   messages can stay kind-appropriate.

use thiserror::Error;

/// Failure kinds reported by the persistence collaborator.
///
/// Only `Timeout` and `Transient` are retry-eligible; the store wrapper
/// retries those at most once. `NotFound` is promoted to
/// [`AppError::NotFound`] so a stale-read caller sees "someone else
/// already changed this" rather than a backend fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store call timed out after {0}ms")]
    Timeout(u64),

    #[error("transient store failure: {0}")]
    Transient(String),

    #[error("store failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether a single retry is worth attempting.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transient(_))
    }
}

/// Application error taxonomy.
///
/// Every public service operation either returns a successful result or
/// fails with one of these kinds; nothing is silently swallowed.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete input. Raised before any store call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Verification-code mismatch. No mutation was performed.
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// A referenced id no longer exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence collaborator failure, surfaced verbatim with cause.
    #[error("persistence error")]
    Persistence(#[source] StoreError),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Persistence(other),
        }
    }
}

/// Result alias used by every service operation.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_app_not_found() {
        let err: AppError = StoreError::NotFound("bill b1".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn backend_failures_keep_persistence_kind() {
        let err: AppError = StoreError::Backend("connection reset".into()).into();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn only_timeout_and_transient_are_retryable() {
        assert!(StoreError::Timeout(500).is_transient());
        assert!(StoreError::Transient("dns".into()).is_transient());
        assert!(!StoreError::NotFound("x".into()).is_transient());
        assert!(!StoreError::Backend("x".into()).is_transient());
    }
}
