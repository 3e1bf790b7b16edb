//! Reporting Aggregator
//!
//! Read-only derived views over the bill/return history. Everything
//! here is a point-in-time snapshot; callers re-fetch after mutating.

#[cfg(test)]
mod tests;

use crate::store::{Entity, Filter, Order, StoreHandle};
use rust_decimal::Decimal;
use shared::AppResult;
use shared::models::{Bill, BillStatus, Stall, SurveyShare, Ward};
use shared::money::percent_of;
use std::collections::BTreeMap;

/// Per-stall sales figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallSummary {
    pub total_sales: Decimal,
    pub paid_sales: Decimal,
    pub pending_sales: Decimal,
    /// Organizer cut: Σ price × quantity × margin/100 over all billed
    /// items, paid or pending. Computed from gross billed amounts;
    /// sales returns do not reduce commission.
    pub commission: Decimal,
}

/// One item's sales across a stall's bills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSales {
    pub name: String,
    pub quantity: i32,
    pub amount: Decimal,
}

/// Share activity of one ward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardShare {
    pub ward_id: String,
    pub ward_number: String,
    pub ward_name: Option<String>,
    pub share_count: i64,
    pub view_count: i64,
}

/// Per-panchayath survey share summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanchayathShareSummary {
    pub wards: Vec<WardShare>,
    pub total_shares: i64,
    pub total_views: i64,
}

pub struct ReportService {
    store: StoreHandle,
}

impl ReportService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Sales and commission figures for one stall.
    pub async fn stall_summary(&self, stall_id: &str) -> AppResult<StallSummary> {
        let bills = self.stall_bills(stall_id).await?;

        let mut summary = StallSummary {
            total_sales: Decimal::ZERO,
            paid_sales: Decimal::ZERO,
            pending_sales: Decimal::ZERO,
            commission: Decimal::ZERO,
        };
        for bill in &bills {
            summary.total_sales += bill.total;
            match bill.status {
                BillStatus::Paid => summary.paid_sales += bill.total,
                BillStatus::Pending => summary.pending_sales += bill.total,
            }
            for item in &bill.items {
                summary.commission += percent_of(item.line_total(), item.event_margin_percent);
            }
        }
        Ok(summary)
    }

    /// Items sold by one stall, grouped by item name, biggest earner
    /// first.
    pub async fn items_sold_summary(&self, stall_id: &str) -> AppResult<Vec<ItemSales>> {
        let bills = self.stall_bills(stall_id).await?;

        let mut by_name: BTreeMap<String, ItemSales> = BTreeMap::new();
        for item in bills.iter().flat_map(|b| &b.items) {
            let entry = by_name.entry(item.name.clone()).or_insert_with(|| ItemSales {
                name: item.name.clone(),
                quantity: 0,
                amount: Decimal::ZERO,
            });
            entry.quantity += item.quantity;
            entry.amount += item.line_total();
        }

        let mut items: Vec<ItemSales> = by_name.into_values().collect();
        items.sort_by(|a, b| b.amount.cmp(&a.amount));
        Ok(items)
    }

    /// Share counts and accumulated views per ward of a panchayath,
    /// derived from the external sharing-tracking records.
    pub async fn panchayath_share_summary(
        &self,
        panchayath_id: &str,
    ) -> AppResult<PanchayathShareSummary> {
        let wards: Vec<Ward> = self
            .store
            .fetch_all(
                Entity::Wards,
                Filter::eq("panchayath_id", panchayath_id),
                Order::asc("ward_number"),
            )
            .await?;
        let shares: Vec<SurveyShare> = self
            .store
            .fetch_all(
                Entity::SurveyShares,
                Filter::eq("panchayath_id", panchayath_id),
                Order::unordered(),
            )
            .await?;

        let mut per_ward: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for share in &shares {
            let entry = per_ward.entry(share.ward_id.as_str()).or_default();
            entry.0 += 1;
            entry.1 += share.view_count;
        }

        let wards: Vec<WardShare> = wards
            .iter()
            .map(|ward| {
                let (share_count, view_count) =
                    per_ward.get(ward.id.as_str()).copied().unwrap_or_default();
                WardShare {
                    ward_id: ward.id.clone(),
                    ward_number: ward.ward_number.clone(),
                    ward_name: ward.ward_name.clone(),
                    share_count,
                    view_count,
                }
            })
            .collect();

        Ok(PanchayathShareSummary {
            total_shares: wards.iter().map(|w| w.share_count).sum(),
            total_views: wards.iter().map(|w| w.view_count).sum(),
            wards,
        })
    }

    /// Stalls of one panchayath, for scoping the summary views.
    pub async fn stalls_in_panchayath(&self, panchayath_id: &str) -> AppResult<Vec<Stall>> {
        self.store
            .fetch_all(
                Entity::Stalls,
                Filter::eq("panchayath_id", panchayath_id),
                Order::asc("counter_name"),
            )
            .await
    }

    async fn stall_bills(&self, stall_id: &str) -> AppResult<Vec<Bill>> {
        self.store
            .fetch_all(
                Entity::Bills,
                Filter::eq("stall_id", stall_id),
                Order::desc("created_at"),
            )
            .await
    }
}
