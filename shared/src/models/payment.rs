//! Payment Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment type recorded for stall registration-fee receipts.
pub const PAYMENT_TYPE_PARTICIPANT: &str = "participant";

/// Payment entity: a stall's registration-fee cash receipt.
///
/// The existence of a Payment row for a stall is the signal that the
/// stall's fee is paid; there is no status flag on the Stall itself.
/// The model does not prevent multiple rows per stall, so aggregates
/// sum them rather than assume uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// Stall reference (String ID)
    pub stall_id: String,
    /// Kept as a stored string; `"participant"` today
    pub payment_type: String,
    pub amount_paid: Decimal,
    pub total_billed: Decimal,
    pub narration: Option<String>,
    pub created_at: i64,
}
