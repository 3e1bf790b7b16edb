//! Panchayath / Ward reference data
//!
//! Read-only to the core; referenced by stalls, registrations,
//! enquiries and the share summary.

use serde::{Deserialize, Serialize};

/// Panchayath entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panchayath {
    pub id: String,
    pub name: String,
}

/// Ward entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ward {
    pub id: String,
    /// Panchayath reference (String ID)
    pub panchayath_id: String,
    pub ward_number: String,
    pub ward_name: Option<String>,
}
