//! Billing
//!
//! Draft composition ([`BillComposer`]) and bill persistence
//! ([`BillingService`]). A committed bill starts `pending`; committing
//! never mutates previously committed bills.

pub mod composer;

#[cfg(test)]
mod tests;

pub use composer::{BillComposer, NewBill};

use crate::numbering::NumberGenerator;
use crate::store::{Entity, Filter, Order, StoreHandle};
use shared::AppResult;
use shared::models::{Bill, BillStatus, Product, Stall};
use shared::util::{new_id, now_millis};
use std::sync::Arc;

pub struct BillingService {
    store: StoreHandle,
    numbers: Arc<NumberGenerator>,
}

impl BillingService {
    pub fn new(store: StoreHandle, numbers: Arc<NumberGenerator>) -> Self {
        Self { store, numbers }
    }

    /// Persist a validated draft as a pending bill with a fresh receipt
    /// number and display serial.
    pub async fn commit(&self, draft: NewBill) -> AppResult<Bill> {
        let serial = self.next_serial().await?;
        let bill = Bill {
            id: new_id(),
            stall_id: draft.stall_id,
            receipt_number: self.numbers.receipt_number(),
            serial_number: Some(serial),
            items: draft.items,
            subtotal: draft.total,
            total: draft.total,
            status: BillStatus::Pending,
            remarks: draft.remarks,
            created_at: now_millis(),
        };
        self.store.insert_model(Entity::Bills, &bill).await?;
        tracing::info!(
            receipt = %bill.receipt_number,
            stall = %bill.stall_id,
            total = %bill.total,
            "bill committed"
        );
        Ok(bill)
    }

    /// Counters eligible for billing: verified stalls, by counter name.
    pub async fn billing_eligible_stalls(&self) -> AppResult<Vec<Stall>> {
        self.store
            .fetch_all(
                Entity::Stalls,
                Filter::eq("is_verified", true),
                Order::asc("counter_name"),
            )
            .await
    }

    /// Quick counter lookup by operator-entered number.
    pub async fn find_stall_by_counter(&self, counter_number: &str) -> AppResult<Option<Stall>> {
        let mut stalls: Vec<Stall> = self
            .store
            .fetch_all(
                Entity::Stalls,
                Filter::eq("counter_number", counter_number).and("is_verified", true),
                Order::unordered(),
            )
            .await?;
        Ok(stalls.pop())
    }

    /// Quick product lookup by operator-entered number, scoped to the
    /// selected stalls.
    pub async fn find_product_by_number(
        &self,
        stall_ids: &[String],
        product_number: &str,
    ) -> AppResult<Option<Product>> {
        let products: Vec<Product> = self
            .store
            .fetch_all(
                Entity::Products,
                Filter::eq("product_number", product_number),
                Order::unordered(),
            )
            .await?;
        Ok(products
            .into_iter()
            .find(|p| stall_ids.contains(&p.stall_id)))
    }

    /// Products offered by one stall, by item name.
    pub async fn products_for_stall(&self, stall_id: &str) -> AppResult<Vec<Product>> {
        self.store
            .fetch_all(
                Entity::Products,
                Filter::eq("stall_id", stall_id),
                Order::asc("item_name"),
            )
            .await
    }

    /// All bills, newest first, optionally restricted to one status.
    pub async fn bills(&self, status: Option<BillStatus>) -> AppResult<Vec<Bill>> {
        let filter = match status {
            Some(status) => Filter::eq("status", status),
            None => Filter::all(),
        };
        self.store
            .fetch_all(Entity::Bills, filter, Order::desc("created_at"))
            .await
    }

    /// Display serial for the next receipt. Assigned from the current
    /// bill count; a racing commit may duplicate it, which the
    /// single-operator model accepts; `receipt_number` stays unique.
    async fn next_serial(&self) -> AppResult<i64> {
        let existing = self
            .store
            .query(Entity::Bills, Filter::all(), Order::unordered())
            .await?;
        Ok(existing.len() as i64 + 1)
    }
}
