use super::*;
use crate::store::MemoryStore;
use rust_decimal_macros::dec;
use shared::models::{BillItem, SalesReturn};
use shared::util::now_millis;
use std::sync::Arc;

fn service() -> (ReportService, StoreHandle) {
    let store = Arc::new(MemoryStore::new());
    let handle = StoreHandle::new(store, 1000);
    (ReportService::new(handle.clone()), handle)
}

fn item(name: &str, price: Decimal, quantity: i32, margin: Decimal) -> BillItem {
    let mut item = BillItem::new(format!("p-{name}"), name, price, margin);
    item.quantity = quantity;
    item
}

fn bill(id: &str, stall_id: &str, status: BillStatus, items: Vec<BillItem>) -> Bill {
    let total = items.iter().map(BillItem::line_total).sum();
    Bill {
        id: id.into(),
        stall_id: stall_id.into(),
        receipt_number: format!("BILL-{id}"),
        serial_number: None,
        items,
        subtotal: total,
        total,
        status,
        remarks: None,
        created_at: now_millis(),
    }
}

#[tokio::test]
async fn stall_summary_splits_paid_and_pending() {
    let (service, handle) = service();
    handle
        .insert_model(
            Entity::Bills,
            &bill("b1", "s1", BillStatus::Paid, vec![item("Halwa", dec!(90), 2, dec!(20))]),
        )
        .await
        .unwrap();
    handle
        .insert_model(
            Entity::Bills,
            &bill("b2", "s1", BillStatus::Pending, vec![item("Tea", dec!(10), 5, dec!(10))]),
        )
        .await
        .unwrap();
    // Another stall's bill never leaks into s1's summary
    handle
        .insert_model(
            Entity::Bills,
            &bill("b3", "s2", BillStatus::Paid, vec![item("Juice", dec!(30), 1, dec!(20))]),
        )
        .await
        .unwrap();

    let summary = service.stall_summary("s1").await.unwrap();
    assert_eq!(summary.total_sales, dec!(230));
    assert_eq!(summary.paid_sales, dec!(180));
    assert_eq!(summary.pending_sales, dec!(50));
    // 180 * 20% + 50 * 10%
    assert_eq!(summary.commission, dec!(41));
}

#[tokio::test]
async fn commission_is_not_reduced_by_sales_returns() {
    let (service, handle) = service();
    handle
        .insert_model(
            Entity::Bills,
            &bill("b1", "s1", BillStatus::Paid, vec![item("Halwa", dec!(50), 4, dec!(20))]),
        )
        .await
        .unwrap();
    handle
        .insert_model(
            Entity::SalesReturns,
            &SalesReturn {
                id: "sr1".into(),
                bill_id: "b1".into(),
                stall_id: "s1".into(),
                return_number: "RET-sr1".into(),
                items: vec![],
                return_amount: dec!(100),
                reason: None,
                created_at: now_millis(),
            },
        )
        .await
        .unwrap();

    let summary = service.stall_summary("s1").await.unwrap();
    // Gross billed 200 at 20% margin; the 100 returned is ignored here
    assert_eq!(summary.commission, dec!(40));
    assert_eq!(summary.paid_sales, dec!(200));
}

#[tokio::test]
async fn items_sold_groups_by_name_and_sorts_by_amount() {
    let (service, handle) = service();
    handle
        .insert_model(
            Entity::Bills,
            &bill(
                "b1",
                "s1",
                BillStatus::Paid,
                vec![item("Halwa", dec!(90), 2, dec!(20)), item("Tea", dec!(10), 5, dec!(20))],
            ),
        )
        .await
        .unwrap();
    handle
        .insert_model(
            Entity::Bills,
            &bill("b2", "s1", BillStatus::Pending, vec![item("Tea", dec!(10), 20, dec!(20))]),
        )
        .await
        .unwrap();

    let items = service.items_sold_summary("s1").await.unwrap();
    assert_eq!(items.len(), 2);
    // Tea: 25 units, 250; Halwa: 2 units, 180
    assert_eq!(items[0].name, "Tea");
    assert_eq!(items[0].quantity, 25);
    assert_eq!(items[0].amount, dec!(250));
    assert_eq!(items[1].name, "Halwa");
    assert_eq!(items[1].amount, dec!(180));
}

#[tokio::test]
async fn share_summary_counts_per_ward() {
    let (service, handle) = service();
    for (id, number) in [("w1", "1"), ("w2", "2")] {
        handle
            .insert_model(
                Entity::Wards,
                &Ward {
                    id: id.into(),
                    panchayath_id: "pan1".into(),
                    ward_number: number.into(),
                    ward_name: None,
                },
            )
            .await
            .unwrap();
    }
    for (id, ward, views) in [("sh1", "w1", 4), ("sh2", "w1", 6), ("sh3", "w2", 1)] {
        handle
            .insert_model(
                Entity::SurveyShares,
                &SurveyShare {
                    id: id.into(),
                    ward_id: ward.into(),
                    panchayath_id: "pan1".into(),
                    view_count: views,
                    created_at: now_millis(),
                },
            )
            .await
            .unwrap();
    }

    let summary = service.panchayath_share_summary("pan1").await.unwrap();
    assert_eq!(summary.total_shares, 3);
    assert_eq!(summary.total_views, 11);
    assert_eq!(summary.wards[0].share_count, 2);
    assert_eq!(summary.wards[0].view_count, 10);
    assert_eq!(summary.wards[1].share_count, 1);
}
