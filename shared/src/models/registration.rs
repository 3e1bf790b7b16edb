//! Registration Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What kind of one-time fee the registration collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    StallCounter,
    EmploymentBooking,
    EmploymentRegistration,
}

/// Registration entity: a one-time fee collection event, independent
/// of any billing activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub registration_type: RegistrationType,
    pub name: String,
    pub category: Option<String>,
    pub mobile: Option<String>,
    pub amount: Decimal,
    /// Unique, generated at creation (`REG-` prefix)
    pub receipt_number: String,
    pub panchayath_id: Option<String>,
    pub ward_id: Option<String>,
    pub created_at: i64,
}

/// Create registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCreate {
    pub registration_type: RegistrationType,
    pub name: String,
    pub category: Option<String>,
    pub mobile: Option<String>,
    pub amount: Decimal,
    pub panchayath_id: Option<String>,
    pub ward_id: Option<String>,
}

/// Update registration payload (authenticated edit flow)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub mobile: Option<String>,
    pub amount: Option<Decimal>,
}
