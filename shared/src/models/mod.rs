//! Data models
//!
//! Ledger entities shared between the service crate and any outer
//! surface. Entities are passive serde records; mutation flows live in
//! `ledger-core`. All ids are UUID strings, timestamps are epoch millis.

pub mod billing;
pub mod enquiry;
pub mod panchayath;
pub mod payment;
pub mod product;
pub mod registration;
pub mod sales_return;
pub mod stall;
pub mod survey;

// Re-exports
pub use billing::*;
pub use enquiry::*;
pub use panchayath::*;
pub use payment::*;
pub use product::*;
pub use registration::*;
pub use sales_return::*;
pub use stall::*;
pub use survey::*;
