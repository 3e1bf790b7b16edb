//! Event-console billing and settlement core
//!
//! The operational crate of the ledger: configuration, logging, the
//! persistence collaborator contract, and the domain services: bill
//! composition, settlement tracking, sales returns, reporting, plus the
//! registration and enquiry intake flows.
//!
//! Persistence is injected: every service talks to a [`store::Store`]
//! through a [`store::StoreHandle`] that applies the configured call
//! timeout and a single retry on transient failures. There is no HTTP
//! or UI surface here; the services are the public API.

pub mod billing;
pub mod config;
pub mod enquiry;
pub mod logger;
pub mod numbering;
pub mod registry;
pub mod reports;
pub mod returns;
pub mod settlement;
pub mod state;
pub mod store;

// Re-exports
pub use config::Config;
pub use state::Ledger;
