use super::*;
use crate::numbering::NumberGenerator;
use crate::store::{MemoryStore, StoreHandle};
use rust_decimal_macros::dec;
use shared::AppError;
use shared::models::{BillStatus, Product};
use std::sync::Arc;

fn product(id: &str, name: &str, selling: &str, margin: Option<&str>) -> Product {
    Product {
        id: id.into(),
        stall_id: "s1".into(),
        item_name: name.into(),
        product_number: format!("P-{id}"),
        cost_price: None,
        selling_price: Some(selling.parse().unwrap()),
        event_margin_percent: margin.map(|m| m.parse().unwrap()),
        created_at: 0,
    }
}

#[test]
fn adding_same_product_increments_quantity() {
    let mut composer = BillComposer::new();
    let p = product("p1", "Halwa", "100", Some("20"));
    composer.add_product(&p);
    composer.add_product(&p);

    assert_eq!(composer.items().len(), 1);
    assert_eq!(composer.items()[0].quantity, 2);
    assert_eq!(composer.items()[0].price, dec!(100));
}

#[test]
fn discount_edit_flows_into_total() {
    // Two units at 100 with a per-unit discount of 10 -> total 180
    let mut composer = BillComposer::new();
    let p = product("p1", "Halwa", "100", Some("20"));
    composer.add_product(&p);
    composer.add_product(&p);
    composer.set_item_discount("p1", dec!(10));

    assert_eq!(composer.items()[0].price, dec!(90));
    assert_eq!(composer.total(), dec!(180));
}

#[test]
fn price_edit_is_inverse_of_discount_edit() {
    let mut composer = BillComposer::new();
    composer.add_product(&product("p1", "Halwa", "100", None));
    composer.set_item_price("p1", dec!(85));

    let item = &composer.items()[0];
    assert_eq!(item.discount, dec!(15));
    assert_eq!(item.price + item.discount, item.original_price);
}

#[test]
fn unpriced_product_seeds_at_zero_with_default_margin() {
    let mut composer = BillComposer::new();
    let mut p = product("p1", "Sample", "0", None);
    p.selling_price = None;
    composer.add_product(&p);

    let item = &composer.items()[0];
    assert_eq!(item.price, dec!(0));
    assert_eq!(item.event_margin_percent, dec!(20));
}

#[test]
fn quantity_below_one_removes_the_line() {
    let mut composer = BillComposer::new();
    composer.add_product(&product("p1", "Halwa", "100", None));
    composer.set_quantity("p1", 0);
    assert!(composer.is_empty());
}

#[test]
fn build_requires_counter_and_items() {
    let mut composer = BillComposer::new();
    assert!(matches!(
        composer.build(None),
        Err(AppError::Validation(_))
    ));

    composer.select_stall("s1");
    assert!(matches!(
        composer.build(None),
        Err(AppError::Validation(_))
    ));

    composer.add_product(&product("p1", "Halwa", "100", None));
    let draft = composer.build(Some("  ".into())).unwrap();
    assert_eq!(draft.stall_id, "s1");
    assert_eq!(draft.total, dec!(100));
    assert!(draft.remarks.is_none());
}

#[tokio::test]
async fn commit_persists_a_pending_bill() {
    let store = Arc::new(MemoryStore::new());
    let handle = StoreHandle::new(store, 1000);
    let service = BillingService::new(handle.clone(), Arc::new(NumberGenerator::new()));

    let mut composer = BillComposer::new();
    composer.select_stall("s1");
    composer.add_product(&product("p1", "Halwa", "100", Some("20")));
    composer.add_product(&product("p1", "Halwa", "100", Some("20")));
    composer.set_item_discount("p1", dec!(10));

    let bill = service.commit(composer.build(None).unwrap()).await.unwrap();
    assert_eq!(bill.status, BillStatus::Pending);
    assert_eq!(bill.subtotal, dec!(180));
    assert_eq!(bill.total, dec!(180));
    assert!(bill.receipt_number.starts_with("BILL-"));
    assert_eq!(bill.serial_number, Some(1));

    // A second commit is an independent creation
    composer.clear();
    composer.select_stall("s2");
    composer.add_product(&product("p2", "Tea", "10", None));
    let second = service.commit(composer.build(None).unwrap()).await.unwrap();
    assert_eq!(second.serial_number, Some(2));
    assert_ne!(second.receipt_number, bill.receipt_number);

    let bills = service.bills(None).await.unwrap();
    assert_eq!(bills.len(), 2);
}
