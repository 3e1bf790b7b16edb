//! Sales Return Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line item of a sales return: the billed item plus the returned
/// quantity. Only items with `return_qty > 0` are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnItem {
    /// Product reference (String ID)
    pub product_id: String,
    pub name: String,
    /// Unit price at billing time (after discount)
    pub price: Decimal,
    /// Quantity on the original bill
    pub quantity: i32,
    pub return_qty: i32,
}

impl ReturnItem {
    /// `price * return_qty`
    pub fn refund_amount(&self) -> Decimal {
        self.price * Decimal::from(self.return_qty)
    }
}

/// Sales return entity: a partial refund against a paid Bill.
///
/// Never mutated after creation; deleted together with its parent Bill.
/// The parent Bill keeps its original face value; downstream
/// aggregation nets the return out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReturn {
    pub id: String,
    /// Bill reference (String ID)
    pub bill_id: String,
    /// Stall reference (String ID), denormalized for per-stall queries
    pub stall_id: String,
    /// Unique, generated at commit (`RET-` prefix)
    pub return_number: String,
    pub items: Vec<ReturnItem>,
    pub return_amount: Decimal,
    pub reason: Option<String>,
    pub created_at: i64,
}
