use super::*;
use crate::store::MemoryStore;
use rust_decimal_macros::dec;
use shared::AppError;
use shared::models::RegistrationType;

fn service() -> (RegistryService, StoreHandle) {
    let store = Arc::new(MemoryStore::new());
    let handle = StoreHandle::new(store, 1000);
    (
        RegistryService::new(handle.clone(), Arc::new(NumberGenerator::new())),
        handle,
    )
}

fn stall_payload() -> StallCreate {
    StallCreate {
        counter_number: "12".into(),
        counter_name: "Snacks Corner".into(),
        participant_name: "Asha".into(),
        mobile: "9447000000".into(),
        registration_fee: dec!(500),
        panchayath_id: None,
    }
}

#[tokio::test]
async fn new_stalls_start_unverified() {
    let (service, _) = service();
    let stall = service.register_stall(stall_payload()).await.unwrap();
    assert!(!stall.is_verified);
    assert_eq!(stall.registration_fee, dec!(500));
}

#[tokio::test]
async fn stall_payload_is_validated_before_persisting() {
    let (service, handle) = service();
    let mut payload = stall_payload();
    payload.counter_name = "  ".into();

    let err = service.register_stall(payload).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let rows = handle
        .query(Entity::Stalls, Filter::all(), Order::unordered())
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn product_requires_an_existing_stall() {
    let (service, _) = service();
    let err = service
        .add_product(ProductCreate {
            stall_id: "missing".into(),
            item_name: "Halwa".into(),
            product_number: "1".into(),
            cost_price: None,
            selling_price: Some(dec!(100)),
            event_margin_percent: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let (service, handle) = service();
    let stall = service.register_stall(stall_payload()).await.unwrap();

    let product = service
        .add_product(ProductCreate {
            stall_id: stall.id.clone(),
            item_name: "Halwa".into(),
            product_number: "1".into(),
            cost_price: Some(dec!(60)),
            selling_price: Some(dec!(100)),
            event_margin_percent: Some(dec!(25)),
        })
        .await
        .unwrap();

    service
        .update_product(
            &product.id,
            ProductUpdate {
                selling_price: Some(dec!(110)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored: Product = handle.fetch_by_id(Entity::Products, &product.id).await.unwrap();
    assert_eq!(stored.selling_price, Some(dec!(110)));
    assert_eq!(stored.item_name, "Halwa");

    service.delete_product(&product.id).await.unwrap();
    let err = handle
        .fetch_by_id::<Product>(Entity::Products, &product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn registration_gets_a_receipt_number() {
    let (service, _) = service();
    let registration = service
        .create_registration(RegistrationCreate {
            registration_type: RegistrationType::EmploymentBooking,
            name: "Applicant".into(),
            category: Some("Tailoring".into()),
            mobile: Some("9447000001".into()),
            amount: dec!(50),
            panchayath_id: None,
            ward_id: None,
        })
        .await
        .unwrap();
    assert!(registration.receipt_number.starts_with("REG-"));

    let err = service
        .create_registration(RegistrationCreate {
            registration_type: RegistrationType::EmploymentRegistration,
            name: "".into(),
            category: None,
            mobile: None,
            amount: dec!(-1),
            panchayath_id: None,
            ward_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn registration_update_and_delete() {
    let (service, handle) = service();
    let registration = service
        .create_registration(RegistrationCreate {
            registration_type: RegistrationType::StallCounter,
            name: "Applicant".into(),
            category: None,
            mobile: None,
            amount: dec!(100),
            panchayath_id: None,
            ward_id: None,
        })
        .await
        .unwrap();

    service
        .update_registration(
            &registration.id,
            RegistrationUpdate {
                amount: Some(dec!(150)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored: Registration = handle
        .fetch_by_id(Entity::Registrations, &registration.id)
        .await
        .unwrap();
    assert_eq!(stored.amount, dec!(150));
    // Untouched fields survive the partial update
    assert_eq!(stored.receipt_number, registration.receipt_number);

    service.delete_registration(&registration.id).await.unwrap();
    assert!(service.registrations().await.unwrap().is_empty());
}
