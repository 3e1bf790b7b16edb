//! Shared types for the event-console ledger
//!
//! Passive domain records, the unified error system, money helpers and
//! small utilities used by `ledger-core`. This crate holds no behavior
//! beyond invariant-preserving accessors; all mutation flows live in the
//! service crate.

pub mod error;
pub mod models;
pub mod money;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, StoreError};
pub use serde::{Deserialize, Serialize};
