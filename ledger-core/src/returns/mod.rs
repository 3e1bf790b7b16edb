//! Return Processor
//!
//! Converts a paid bill into a partial-refund sales return. The draft
//! is opened against the bill *and* its previously committed returns,
//! so the settable quantity per item is what is still returnable;
//! successive partial returns can never exceed what was billed. The
//! bill itself is never mutated; the return is a separate ledger entry
//! that downstream aggregation nets out.


use crate::numbering::NumberGenerator;
use crate::store::{Entity, Filter, Order, StoreHandle};
use rust_decimal::Decimal;
use shared::models::{Bill, ReturnItem, SalesReturn};
use shared::util::{new_id, now_millis};
use shared::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::{AppError, AppResult};
use std::sync::Arc;

/// One line of a return being drafted.
#[derive(Debug, Clone)]
pub struct DraftLine {
    pub product_id: String,
    pub name: String,
    /// Unit price at billing time (after discount)
    pub price: Decimal,
    /// Quantity on the original bill
    pub billed_qty: i32,
    /// Billed minus previously returned
    pub returnable_qty: i32,
    pub return_qty: i32,
}

impl DraftLine {
    fn refund(&self) -> Decimal {
        self.price * Decimal::from(self.return_qty)
    }
}

/// Working copy of a bill's items annotated with return quantities.
#[derive(Debug, Clone)]
pub struct ReturnDraft {
    bill_id: String,
    stall_id: String,
    lines: Vec<DraftLine>,
}

/// A validated return ready to persist.
#[derive(Debug, Clone)]
pub struct NewReturn {
    pub bill_id: String,
    pub stall_id: String,
    pub items: Vec<ReturnItem>,
    pub return_amount: Decimal,
    pub reason: Option<String>,
}

impl ReturnDraft {
    fn open(bill: &Bill, prior_returns: &[SalesReturn]) -> Self {
        let lines = bill
            .items
            .iter()
            .map(|item| {
                let already_returned: i32 = prior_returns
                    .iter()
                    .flat_map(|r| &r.items)
                    .filter(|ri| ri.product_id == item.product_id)
                    .map(|ri| ri.return_qty)
                    .sum();
                DraftLine {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    billed_qty: item.quantity,
                    returnable_qty: (item.quantity - already_returned).max(0),
                    return_qty: 0,
                }
            })
            .collect();
        Self {
            bill_id: bill.id.clone(),
            stall_id: bill.stall_id.clone(),
            lines,
        }
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Set the return quantity for one item, clamped to
    /// `[0, returnable]`.
    pub fn set_return_qty(&mut self, product_id: &str, qty: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.return_qty = qty.clamp(0, line.returnable_qty);
        }
    }

    /// Σ price × return_qty over the working copy.
    pub fn return_total(&self) -> Decimal {
        self.lines.iter().map(DraftLine::refund).sum()
    }

    /// Validate into a [`NewReturn`] holding only the lines actually
    /// returned. At least one unit of one item must be returned.
    pub fn build(&self, reason: Option<String>) -> AppResult<NewReturn> {
        let return_amount = self.return_total();
        if return_amount <= Decimal::ZERO {
            return Err(AppError::validation("select items to return"));
        }
        let reason = reason.map(|r| r.trim().to_owned()).filter(|r| !r.is_empty());
        validate_optional_text(reason.as_deref(), "reason", MAX_NOTE_LEN)?;
        let items = self
            .lines
            .iter()
            .filter(|l| l.return_qty > 0)
            .map(|l| ReturnItem {
                product_id: l.product_id.clone(),
                name: l.name.clone(),
                price: l.price,
                quantity: l.billed_qty,
                return_qty: l.return_qty,
            })
            .collect();
        Ok(NewReturn {
            bill_id: self.bill_id.clone(),
            stall_id: self.stall_id.clone(),
            items,
            return_amount,
            reason,
        })
    }
}

pub struct ReturnService {
    store: StoreHandle,
    numbers: Arc<NumberGenerator>,
}

impl ReturnService {
    pub fn new(store: StoreHandle, numbers: Arc<NumberGenerator>) -> Self {
        Self { store, numbers }
    }

    /// Open a return draft for a bill, bounded by what previous returns
    /// have already taken back.
    pub async fn open_return(&self, bill_id: &str) -> AppResult<ReturnDraft> {
        let bill: Bill = self.store.fetch_by_id(Entity::Bills, bill_id).await?;
        let prior = self.returns_for_bill(bill_id).await?;
        Ok(ReturnDraft::open(&bill, &prior))
    }

    /// Persist a validated return under a fresh return number. The
    /// parent bill keeps its status and face value.
    pub async fn commit(&self, new_return: NewReturn) -> AppResult<SalesReturn> {
        let record = SalesReturn {
            id: new_id(),
            bill_id: new_return.bill_id,
            stall_id: new_return.stall_id,
            return_number: self.numbers.return_number(),
            items: new_return.items,
            return_amount: new_return.return_amount,
            reason: new_return.reason,
            created_at: now_millis(),
        };
        self.store
            .insert_model(Entity::SalesReturns, &record)
            .await?;
        tracing::info!(
            return_number = %record.return_number,
            bill = %record.bill_id,
            amount = %record.return_amount,
            "sales return recorded"
        );
        Ok(record)
    }

    /// All returns recorded against one bill, oldest first.
    pub async fn returns_for_bill(&self, bill_id: &str) -> AppResult<Vec<SalesReturn>> {
        self.store
            .fetch_all(
                Entity::SalesReturns,
                Filter::eq("bill_id", bill_id),
                Order::asc("created_at"),
            )
            .await
    }

    /// Total refunded against one bill so far.
    pub async fn returned_amount_for_bill(&self, bill_id: &str) -> AppResult<Decimal> {
        let returns = self.returns_for_bill(bill_id).await?;
        Ok(returns.iter().map(|r| r.return_amount).sum())
    }
}
