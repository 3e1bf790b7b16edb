//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Organizer cut applied when a product carries no margin of its own.
pub const DEFAULT_EVENT_MARGIN: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Product entity, owned exclusively by one Stall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Stall reference (String ID)
    pub stall_id: String,
    pub item_name: String,
    /// Quick-entry key in the billing console
    pub product_number: String,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    /// Organizer margin in percent; `None` means [`DEFAULT_EVENT_MARGIN`]
    pub event_margin_percent: Option<Decimal>,
    pub created_at: i64,
}

impl Product {
    /// Selling price used when the item is added to a bill (0 if unset).
    pub fn effective_selling_price(&self) -> Decimal {
        self.selling_price.unwrap_or(Decimal::ZERO)
    }

    /// Margin percentage used for commission computation.
    pub fn effective_margin(&self) -> Decimal {
        self.event_margin_percent.unwrap_or(DEFAULT_EVENT_MARGIN)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub stall_id: String,
    pub item_name: String,
    pub product_number: String,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub event_margin_percent: Option<Decimal>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub item_name: Option<String>,
    pub product_number: Option<String>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub event_margin_percent: Option<Decimal>,
}
