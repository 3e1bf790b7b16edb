//! Bill Composer
//!
//! In-memory draft of a bill being assembled at the counter. Pure:
//! nothing here touches the store. Item edits keep the
//! price/discount/original-price invariant through the [`BillItem`]
//! accessors; committing is the service's job.

use rust_decimal::Decimal;
use shared::AppError;
use shared::models::{BillItem, Product};
use shared::validation::{MAX_NOTE_LEN, validate_optional_text};

/// Draft bill: selected counters plus the item lines.
#[derive(Debug, Default)]
pub struct BillComposer {
    selected_stalls: Vec<String>,
    items: Vec<BillItem>,
}

/// A validated draft ready to persist.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub stall_id: String,
    pub items: Vec<BillItem>,
    pub total: Decimal,
    pub remarks: Option<String>,
}

impl BillComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a counter for this bill. The first selected counter owns
    /// the committed bill.
    pub fn select_stall(&mut self, stall_id: impl Into<String>) {
        let stall_id = stall_id.into();
        if !self.selected_stalls.contains(&stall_id) {
            self.selected_stalls.push(stall_id);
        }
    }

    pub fn deselect_stall(&mut self, stall_id: &str) {
        self.selected_stalls.retain(|id| id != stall_id);
    }

    /// Add a product: an existing line gains one unit, otherwise a new
    /// line is seeded from the product's selling price and margin.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += 1;
            return;
        }
        self.items.push(BillItem::new(
            product.id.clone(),
            product.item_name.clone(),
            product.effective_selling_price(),
            product.effective_margin(),
        ));
    }

    /// Set the unit price of a line; its discount follows. Unknown ids
    /// are ignored, matching the console's behavior for stale rows.
    pub fn set_item_price(&mut self, product_id: &str, price: Decimal) {
        if let Some(item) = self.item_mut(product_id) {
            item.set_price(price);
        }
    }

    /// Set the per-unit discount of a line; its price follows.
    pub fn set_item_discount(&mut self, product_id: &str, discount: Decimal) {
        if let Some(item) = self.item_mut(product_id) {
            item.set_discount(discount);
        }
    }

    /// Set a line's quantity; anything below 1 removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i32) {
        if quantity < 1 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ price × quantity over all lines.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(BillItem::line_total).sum()
    }

    /// Validate the draft into a [`NewBill`]. Fails when no counter is
    /// selected or the item list is empty.
    pub fn build(&self, remarks: Option<String>) -> Result<NewBill, AppError> {
        let Some(stall_id) = self.selected_stalls.first() else {
            return Err(AppError::validation("select at least one counter"));
        };
        if self.items.is_empty() {
            return Err(AppError::validation("bill has no items"));
        }
        let remarks = remarks.map(|r| r.trim().to_owned()).filter(|r| !r.is_empty());
        validate_optional_text(remarks.as_deref(), "remarks", MAX_NOTE_LEN)?;
        Ok(NewBill {
            stall_id: stall_id.clone(),
            items: self.items.clone(),
            total: self.total(),
            remarks,
        })
    }

    /// Reset after a successful commit; each commit is independent.
    pub fn clear(&mut self) {
        self.selected_stalls.clear();
        self.items.clear();
    }

    fn item_mut(&mut self, product_id: &str) -> Option<&mut BillItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }
}
