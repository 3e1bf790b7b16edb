//! Settlement Tracker
//!
//! Lifecycle transitions and money aggregates across bills, stall-fee
//! payments, registrations and sales returns. Destructive operations on
//! committed bills sit behind the configured verification code; a
//! mismatch performs no mutation.


use crate::store::{Entity, Filter, Order, StoreHandle};
use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{
    Bill, BillStatus, PAYMENT_TYPE_PARTICIPANT, Payment, Product, Registration, SalesReturn, Stall,
};
use shared::util::{new_id, now_millis};
use shared::validation::validate_non_negative_amount;
use shared::{AppError, AppResult};

/// Point-in-time breakdown of everything collected. Each term is
/// independently displayable; [`Collected::net`] is the top line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collected {
    /// Σ total over paid bills
    pub paid_bills: Decimal,
    /// Σ amount_paid over stall-fee payments
    pub stall_fees: Decimal,
    /// Σ amount over registrations
    pub registrations: Decimal,
    /// Σ return_amount over sales returns
    pub sales_returns: Decimal,
}

impl Collected {
    /// `paid_bills + stall_fees + registrations - sales_returns`
    pub fn net(&self) -> Decimal {
        self.paid_bills + self.stall_fees + self.registrations - self.sales_returns
    }
}

pub struct SettlementService {
    store: StoreHandle,
    verification_code: Option<String>,
}

impl SettlementService {
    pub fn new(store: StoreHandle, verification_code: Option<String>) -> Self {
        Self {
            store,
            verification_code,
        }
    }

    /// Transition one bill pending→paid. Idempotent: marking an
    /// already-paid bill succeeds without touching the row.
    pub async fn mark_paid(&self, bill_id: &str) -> AppResult<Bill> {
        let mut bill: Bill = self.store.fetch_by_id(Entity::Bills, bill_id).await?;
        if bill.is_paid() {
            return Ok(bill);
        }
        self.store
            .update(Entity::Bills, bill_id, json!({"status": BillStatus::Paid}))
            .await?;
        bill.status = BillStatus::Paid;
        tracing::info!(receipt = %bill.receipt_number, "payment received");
        Ok(bill)
    }

    /// Record a stall's registration-fee cash receipt. The stall row is
    /// not touched; the Payment row itself is the "fee paid" signal.
    pub async fn record_stall_fee_paid(&self, stall: &Stall) -> AppResult<Payment> {
        let payment = Payment {
            id: new_id(),
            stall_id: stall.id.clone(),
            payment_type: PAYMENT_TYPE_PARTICIPANT.into(),
            amount_paid: stall.registration_fee,
            total_billed: stall.registration_fee,
            narration: Some(format!("Registration fee for {}", stall.counter_name)),
            created_at: now_millis(),
        };
        self.store.insert_model(Entity::Payments, &payment).await?;
        tracing::info!(stall = %stall.id, amount = %payment.amount_paid, "stall fee received");
        Ok(payment)
    }

    /// Mark a stall as operator-verified. Orthogonal to fee payment;
    /// both are needed before the stall appears at the billing counter.
    pub async fn verify_stall(&self, stall_id: &str) -> AppResult<()> {
        self.store
            .update(Entity::Stalls, stall_id, json!({"is_verified": true}))
            .await?;
        tracing::info!(stall = %stall_id, "stall verified");
        Ok(())
    }

    /// Current collected/outstanding breakdown across the whole event.
    pub async fn collected(&self) -> AppResult<Collected> {
        let paid: Vec<Bill> = self
            .store
            .fetch_all(
                Entity::Bills,
                Filter::eq("status", BillStatus::Paid),
                Order::unordered(),
            )
            .await?;
        let payments: Vec<Payment> = self
            .store
            .fetch_all(Entity::Payments, Filter::all(), Order::unordered())
            .await?;
        let registrations: Vec<Registration> = self
            .store
            .fetch_all(Entity::Registrations, Filter::all(), Order::unordered())
            .await?;
        let returns: Vec<SalesReturn> = self
            .store
            .fetch_all(Entity::SalesReturns, Filter::all(), Order::unordered())
            .await?;

        Ok(Collected {
            paid_bills: paid.iter().map(|b| b.total).sum(),
            stall_fees: payments.iter().map(|p| p.amount_paid).sum(),
            registrations: registrations.iter().map(|r| r.amount).sum(),
            sales_returns: returns.iter().map(|r| r.return_amount).sum(),
        })
    }

    /// Overwrite a committed bill's remarks and face value. Gated by
    /// the verification code; sets both `total` and `subtotal`, leaves
    /// status untouched.
    pub async fn edit_bill(
        &self,
        code: &str,
        bill_id: &str,
        remarks: Option<String>,
        total: Decimal,
    ) -> AppResult<()> {
        self.authorize(code)?;
        validate_non_negative_amount(total, "total")?;
        // Existence check so a stale edit surfaces as NotFound
        let _: Bill = self.store.fetch_by_id(Entity::Bills, bill_id).await?;
        self.store
            .update(
                Entity::Bills,
                bill_id,
                json!({"remarks": remarks, "total": total, "subtotal": total}),
            )
            .await?;
        tracing::info!(bill = %bill_id, total = %total, "bill edited");
        Ok(())
    }

    /// Delete a bill and everything that references it. Returns go
    /// first; they are meaningless without their parent.
    pub async fn delete_bill(&self, code: &str, bill_id: &str) -> AppResult<()> {
        self.authorize(code)?;
        let bill: Bill = self.store.fetch_by_id(Entity::Bills, bill_id).await?;
        self.delete_bill_cascade(&bill).await?;
        tracing::info!(receipt = %bill.receipt_number, "bill deleted");
        Ok(())
    }

    /// Delete a stall and cascade through everything it owns: products,
    /// payments, bills (with their returns), then the stall row itself,
    /// so no orphaned financial records remain.
    pub async fn delete_stall(&self, stall_id: &str) -> AppResult<()> {
        let stall: Stall = self.store.fetch_by_id(Entity::Stalls, stall_id).await?;

        let products: Vec<Product> = self
            .store
            .fetch_all(
                Entity::Products,
                Filter::eq("stall_id", stall_id),
                Order::unordered(),
            )
            .await?;
        for product in &products {
            self.store.delete(Entity::Products, &product.id).await?;
        }

        let payments: Vec<Payment> = self
            .store
            .fetch_all(
                Entity::Payments,
                Filter::eq("stall_id", stall_id),
                Order::unordered(),
            )
            .await?;
        for payment in &payments {
            self.store.delete(Entity::Payments, &payment.id).await?;
        }

        let bills: Vec<Bill> = self
            .store
            .fetch_all(
                Entity::Bills,
                Filter::eq("stall_id", stall_id),
                Order::unordered(),
            )
            .await?;
        for bill in &bills {
            self.delete_bill_cascade(bill).await?;
        }

        self.store.delete(Entity::Stalls, stall_id).await?;
        tracing::info!(
            stall = %stall.counter_name,
            products = products.len(),
            bills = bills.len(),
            "stall deleted with cascade"
        );
        Ok(())
    }

    /// Stalls whose registration fee is still outstanding: no payment
    /// row yet and a non-zero fee.
    pub async fn fee_pending_stalls(&self) -> AppResult<Vec<Stall>> {
        let (stalls, paid_ids) = self.stalls_with_payment_ids().await?;
        Ok(stalls
            .into_iter()
            .filter(|s| !paid_ids.contains(&s.id) && s.registration_fee > Decimal::ZERO)
            .collect())
    }

    /// Stalls with at least one recorded fee payment.
    pub async fn fee_paid_stalls(&self) -> AppResult<Vec<Stall>> {
        let (stalls, paid_ids) = self.stalls_with_payment_ids().await?;
        Ok(stalls
            .into_iter()
            .filter(|s| paid_ids.contains(&s.id))
            .collect())
    }

    async fn stalls_with_payment_ids(&self) -> AppResult<(Vec<Stall>, Vec<String>)> {
        let stalls: Vec<Stall> = self
            .store
            .fetch_all(Entity::Stalls, Filter::all(), Order::desc("created_at"))
            .await?;
        let payments: Vec<Payment> = self
            .store
            .fetch_all(Entity::Payments, Filter::all(), Order::unordered())
            .await?;
        let paid_ids = payments.into_iter().map(|p| p.stall_id).collect();
        Ok((stalls, paid_ids))
    }

    async fn delete_bill_cascade(&self, bill: &Bill) -> AppResult<()> {
        let returns: Vec<SalesReturn> = self
            .store
            .fetch_all(
                Entity::SalesReturns,
                Filter::eq("bill_id", &bill.id),
                Order::unordered(),
            )
            .await?;
        for ret in &returns {
            self.store.delete(Entity::SalesReturns, &ret.id).await?;
            tracing::debug!(return_number = %ret.return_number, "sales return deleted");
        }
        self.store.delete(Entity::Bills, &bill.id).await?;
        Ok(())
    }

    fn authorize(&self, code: &str) -> AppResult<()> {
        match &self.verification_code {
            None => Err(AppError::authorization("verification code not configured")),
            Some(expected) if expected == code => Ok(()),
            Some(_) => Err(AppError::authorization("invalid verification code")),
        }
    }
}
