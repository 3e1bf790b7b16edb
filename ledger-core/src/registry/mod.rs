//! Registry
//!
//! Stall, product and registration administration: the flows that put
//! ledger entities into the store in the first place. Every payload is
//! validated before a store call; new stalls always start unverified.

#[cfg(test)]
mod tests;

use crate::numbering::NumberGenerator;
use crate::store::{Entity, Filter, Order, StoreHandle};
use serde_json::{Map, Value, json};
use shared::AppResult;
use shared::models::{
    Panchayath, Product, ProductCreate, ProductUpdate, Registration, RegistrationCreate,
    RegistrationUpdate, Stall, StallCreate, StallUpdate, Ward,
};
use shared::util::{new_id, now_millis};
use shared::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative_amount, validate_optional_text,
    validate_required_text,
};
use std::sync::Arc;

pub struct RegistryService {
    store: StoreHandle,
    numbers: Arc<NumberGenerator>,
}

impl RegistryService {
    pub fn new(store: StoreHandle, numbers: Arc<NumberGenerator>) -> Self {
        Self { store, numbers }
    }

    // ── Stalls ──────────────────────────────────────────────────────

    pub async fn register_stall(&self, payload: StallCreate) -> AppResult<Stall> {
        validate_required_text(&payload.counter_number, "counter_number", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&payload.counter_name, "counter_name", MAX_NAME_LEN)?;
        validate_required_text(&payload.participant_name, "participant_name", MAX_NAME_LEN)?;
        validate_required_text(&payload.mobile, "mobile", MAX_SHORT_TEXT_LEN)?;
        validate_non_negative_amount(payload.registration_fee, "registration_fee")?;

        let stall = Stall {
            id: new_id(),
            counter_number: payload.counter_number,
            counter_name: payload.counter_name,
            participant_name: payload.participant_name,
            mobile: payload.mobile,
            registration_fee: payload.registration_fee,
            is_verified: false,
            panchayath_id: payload.panchayath_id,
            created_at: now_millis(),
        };
        self.store.insert_model(Entity::Stalls, &stall).await?;
        tracing::info!(counter = %stall.counter_name, "stall registered");
        Ok(stall)
    }

    pub async fn update_stall(&self, stall_id: &str, payload: StallUpdate) -> AppResult<()> {
        let mut fields = Map::new();
        if let Some(name) = payload.counter_name {
            validate_required_text(&name, "counter_name", MAX_NAME_LEN)?;
            fields.insert("counter_name".into(), json!(name));
        }
        if let Some(name) = payload.participant_name {
            validate_required_text(&name, "participant_name", MAX_NAME_LEN)?;
            fields.insert("participant_name".into(), json!(name));
        }
        if let Some(mobile) = payload.mobile {
            validate_required_text(&mobile, "mobile", MAX_SHORT_TEXT_LEN)?;
            fields.insert("mobile".into(), json!(mobile));
        }
        if let Some(fee) = payload.registration_fee {
            validate_non_negative_amount(fee, "registration_fee")?;
            fields.insert("registration_fee".into(), json!(fee));
        }
        self.apply_update(Entity::Stalls, stall_id, fields).await
    }

    pub async fn stalls(&self) -> AppResult<Vec<Stall>> {
        self.store
            .fetch_all(Entity::Stalls, Filter::all(), Order::desc("created_at"))
            .await
    }

    // ── Products ────────────────────────────────────────────────────

    pub async fn add_product(&self, payload: ProductCreate) -> AppResult<Product> {
        validate_required_text(&payload.item_name, "item_name", MAX_NAME_LEN)?;
        validate_required_text(&payload.product_number, "product_number", MAX_SHORT_TEXT_LEN)?;
        // The stall must still exist; products are owned exclusively
        let _: Stall = self.store.fetch_by_id(Entity::Stalls, &payload.stall_id).await?;
        for (field, value) in [
            ("cost_price", payload.cost_price),
            ("selling_price", payload.selling_price),
            ("event_margin_percent", payload.event_margin_percent),
        ] {
            if let Some(value) = value {
                validate_non_negative_amount(value, field)?;
            }
        }

        let product = Product {
            id: new_id(),
            stall_id: payload.stall_id,
            item_name: payload.item_name,
            product_number: payload.product_number,
            cost_price: payload.cost_price,
            selling_price: payload.selling_price,
            event_margin_percent: payload.event_margin_percent,
            created_at: now_millis(),
        };
        self.store.insert_model(Entity::Products, &product).await?;
        tracing::info!(item = %product.item_name, stall = %product.stall_id, "product added");
        Ok(product)
    }

    pub async fn update_product(&self, product_id: &str, payload: ProductUpdate) -> AppResult<()> {
        let mut fields = Map::new();
        if let Some(name) = payload.item_name {
            validate_required_text(&name, "item_name", MAX_NAME_LEN)?;
            fields.insert("item_name".into(), json!(name));
        }
        if let Some(number) = payload.product_number {
            validate_required_text(&number, "product_number", MAX_SHORT_TEXT_LEN)?;
            fields.insert("product_number".into(), json!(number));
        }
        for (field, value) in [
            ("cost_price", payload.cost_price),
            ("selling_price", payload.selling_price),
            ("event_margin_percent", payload.event_margin_percent),
        ] {
            if let Some(value) = value {
                validate_non_negative_amount(value, field)?;
                fields.insert(field.into(), json!(value));
            }
        }
        self.apply_update(Entity::Products, product_id, fields).await
    }

    pub async fn delete_product(&self, product_id: &str) -> AppResult<()> {
        self.store.delete(Entity::Products, product_id).await?;
        Ok(())
    }

    // ── Registrations ───────────────────────────────────────────────

    pub async fn create_registration(&self, payload: RegistrationCreate) -> AppResult<Registration> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(payload.mobile.as_deref(), "mobile", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(payload.category.as_deref(), "category", MAX_NAME_LEN)?;
        validate_non_negative_amount(payload.amount, "amount")?;

        let registration = Registration {
            id: new_id(),
            registration_type: payload.registration_type,
            name: payload.name,
            category: payload.category,
            mobile: payload.mobile,
            amount: payload.amount,
            receipt_number: self.numbers.registration_number(),
            panchayath_id: payload.panchayath_id,
            ward_id: payload.ward_id,
            created_at: now_millis(),
        };
        self.store
            .insert_model(Entity::Registrations, &registration)
            .await?;
        tracing::info!(
            receipt = %registration.receipt_number,
            amount = %registration.amount,
            "registration recorded"
        );
        Ok(registration)
    }

    pub async fn update_registration(
        &self,
        registration_id: &str,
        payload: RegistrationUpdate,
    ) -> AppResult<()> {
        let mut fields = Map::new();
        if let Some(name) = payload.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            fields.insert("name".into(), json!(name));
        }
        if let Some(category) = payload.category {
            validate_optional_text(Some(&category), "category", MAX_NAME_LEN)?;
            fields.insert("category".into(), json!(category));
        }
        if let Some(mobile) = payload.mobile {
            validate_optional_text(Some(&mobile), "mobile", MAX_SHORT_TEXT_LEN)?;
            fields.insert("mobile".into(), json!(mobile));
        }
        if let Some(amount) = payload.amount {
            validate_non_negative_amount(amount, "amount")?;
            fields.insert("amount".into(), json!(amount));
        }
        self.apply_update(Entity::Registrations, registration_id, fields)
            .await
    }

    pub async fn delete_registration(&self, registration_id: &str) -> AppResult<()> {
        self.store.delete(Entity::Registrations, registration_id).await?;
        Ok(())
    }

    pub async fn registrations(&self) -> AppResult<Vec<Registration>> {
        self.store
            .fetch_all(Entity::Registrations, Filter::all(), Order::desc("created_at"))
            .await
    }

    // ── Reference data ──────────────────────────────────────────────

    pub async fn panchayaths(&self) -> AppResult<Vec<Panchayath>> {
        self.store
            .fetch_all(Entity::Panchayaths, Filter::all(), Order::asc("name"))
            .await
    }

    pub async fn wards(&self, panchayath_id: &str) -> AppResult<Vec<Ward>> {
        self.store
            .fetch_all(
                Entity::Wards,
                Filter::eq("panchayath_id", panchayath_id),
                Order::asc("ward_number"),
            )
            .await
    }

    async fn apply_update(&self, entity: Entity, id: &str, fields: Map<String, Value>) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        self.store.update(entity, id, Value::Object(fields)).await?;
        Ok(())
    }
}
