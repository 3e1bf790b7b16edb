//! Stall Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stall entity: a vendor counter participating in the event.
///
/// Registration fee collection and operator verification are tracked
/// independently of billing activity: a stall is "fee-paid" iff at
/// least one Payment row references it, and only verified stalls appear
/// in the billing counter-selection list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stall {
    pub id: String,
    /// Operator-facing lookup key in the billing console
    pub counter_number: String,
    pub counter_name: String,
    pub participant_name: String,
    pub mobile: String,
    pub registration_fee: Decimal,
    /// Flipped once an operator confirms the stall; orthogonal to fee payment
    pub is_verified: bool,
    /// Panchayath reference (String ID)
    pub panchayath_id: Option<String>,
    pub created_at: i64,
}

/// Create stall payload; new stalls always start unverified
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StallCreate {
    pub counter_number: String,
    pub counter_name: String,
    pub participant_name: String,
    pub mobile: String,
    pub registration_fee: Decimal,
    pub panchayath_id: Option<String>,
}

/// Update stall payload (authenticated edit flow)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StallUpdate {
    pub counter_name: Option<String>,
    pub participant_name: Option<String>,
    pub mobile: Option<String>,
    pub registration_fee: Option<Decimal>,
}
