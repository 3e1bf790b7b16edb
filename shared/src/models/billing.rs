//! Bill Model
//!
//! A Bill is a committed sales transaction for one stall. Its items are
//! value-owned (serialized inline, never a separate table). Amount
//! invariants live on [`BillItem`] so no caller can hold a line item
//! with `price + discount != original_price`.

use crate::money::clamp_non_negative;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bill payment lifecycle. `pending --mark_paid--> paid`; paid is
/// terminal (returns are a separate ledger entry, not a reversal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
}

/// Line item embedded in a Bill.
///
/// Invariants, enforced by the accessors:
/// - `price == max(0, original_price - discount)`
/// - `discount >= 0`
/// - `quantity >= 1` (a zero-quantity item is removed by the composer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    /// Product reference (String ID)
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
    pub original_price: Decimal,
    pub discount: Decimal,
    pub price: Decimal,
    pub event_margin_percent: Decimal,
}

impl BillItem {
    /// Seed a fresh line item from a product's selling price.
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        selling_price: Decimal,
        event_margin_percent: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity: 1,
            original_price: selling_price,
            discount: Decimal::ZERO,
            price: selling_price,
            event_margin_percent,
        }
    }

    /// Set the unit price directly; the discount follows so that
    /// `price + discount == original_price` whenever the discount does
    /// not exceed the original price. Both are clamped at zero.
    pub fn set_price(&mut self, new_price: Decimal) {
        self.discount = clamp_non_negative(self.original_price - new_price);
        self.price = clamp_non_negative(new_price);
    }

    /// Set the per-unit discount; the price follows, clamped at zero.
    pub fn set_discount(&mut self, discount: Decimal) {
        self.discount = clamp_non_negative(discount);
        self.price = clamp_non_negative(self.original_price - self.discount);
    }

    /// `price * quantity`
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Bill entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    /// Stall reference (String ID)
    pub stall_id: String,
    /// Unique, generated at commit (`BILL-` prefix)
    pub receipt_number: String,
    /// Human-facing receipt sequence; display-only, not a key
    pub serial_number: Option<i64>,
    pub items: Vec<BillItem>,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub status: BillStatus,
    pub remarks: Option<String>,
    pub created_at: i64,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item() -> BillItem {
        BillItem::new("p1", "Halwa", dec!(100), dec!(20))
    }

    #[test]
    fn price_and_discount_stay_consistent() {
        let mut it = item();
        it.set_discount(dec!(10));
        assert_eq!(it.price, dec!(90));
        assert_eq!(it.price + it.discount, it.original_price);

        it.set_price(dec!(75));
        assert_eq!(it.discount, dec!(25));
        assert_eq!(it.price + it.discount, it.original_price);
    }

    #[test]
    fn discount_beyond_original_clamps_price_at_zero() {
        let mut it = item();
        it.set_discount(dec!(150));
        assert_eq!(it.price, Decimal::ZERO);
        assert_eq!(it.discount, dec!(150));
    }

    #[test]
    fn negative_price_clamps_both_ways() {
        let mut it = item();
        it.set_price(dec!(-5));
        assert_eq!(it.price, Decimal::ZERO);
        assert_eq!(it.discount, dec!(105));
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let mut it = item();
        it.quantity = 3;
        it.set_discount(dec!(10));
        assert_eq!(it.line_total(), dec!(270));
    }
}
