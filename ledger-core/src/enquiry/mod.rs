//! Enquiry intake
//!
//! Admin-configurable form fields with conditional visibility, and the
//! submitted-response blobs they describe. The blob is loosely typed by
//! nature; it is validated against the active field definitions at
//! submit and read time rather than trusted.


use crate::store::{Entity, Filter, Order, StoreHandle};
use serde_json::{Map, Value, json};
use shared::models::{
    Enquiry, EnquiryCreate, EnquiryField, EnquiryFieldCreate, EnquiryFieldUpdate, FieldType,
    ResponseValue,
};
use shared::util::{new_id, now_millis};
use shared::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use shared::{AppError, AppResult};
use std::collections::BTreeMap;

/// Whether a field is visible given the responses entered so far: a
/// field with no condition always shows; a conditional one shows only
/// when its controlling field currently holds the required value.
pub fn is_visible(field: &EnquiryField, responses: &BTreeMap<String, ResponseValue>) -> bool {
    let (Some(controller), Some(expected)) =
        (&field.show_conditional_on, &field.conditional_value)
    else {
        return true;
    };
    responses
        .get(controller)
        .and_then(ResponseValue::as_text)
        .is_some_and(|value| value == expected)
}

/// The subset of fields currently visible, in display order.
pub fn visible_fields<'a>(
    fields: &'a [EnquiryField],
    responses: &BTreeMap<String, ResponseValue>,
) -> Vec<&'a EnquiryField> {
    fields.iter().filter(|f| is_visible(f, responses)).collect()
}

/// Validate a response blob against the active field definitions.
///
/// Rejects unknown field ids, values whose shape does not match the
/// field type, select/checkbox values outside the configured options,
/// and missing or empty required fields, but only when those fields
/// are visible under the current responses.
pub fn validate_responses(
    fields: &[EnquiryField],
    responses: &BTreeMap<String, ResponseValue>,
) -> AppResult<()> {
    for (field_id, value) in responses {
        let Some(field) = fields.iter().find(|f| &f.id == field_id) else {
            return Err(AppError::validation(format!(
                "response for unknown field {field_id}"
            )));
        };
        validate_value(field, value)?;
    }
    for field in fields {
        if field.is_required
            && is_visible(field, responses)
            && !responses.get(&field.id).is_some_and(|v| !v.is_empty())
        {
            return Err(AppError::validation(format!(
                "{} is required",
                field.label
            )));
        }
    }
    Ok(())
}

fn validate_value(field: &EnquiryField, value: &ResponseValue) -> AppResult<()> {
    match (field.field_type, value) {
        (FieldType::Text | FieldType::Textarea, ResponseValue::Text(_)) => Ok(()),
        (FieldType::Select, ResponseValue::Text(choice)) => {
            if !field.options.is_empty() && !field.options.contains(choice) {
                return Err(AppError::validation(format!(
                    "{}: '{choice}' is not one of the configured options",
                    field.label
                )));
            }
            Ok(())
        }
        (FieldType::Checkbox, ResponseValue::Multi(choices)) => {
            if !field.options.is_empty() {
                if let Some(bad) = choices.iter().find(|c| !field.options.contains(c)) {
                    return Err(AppError::validation(format!(
                        "{}: '{bad}' is not one of the configured options",
                        field.label
                    )));
                }
            }
            Ok(())
        }
        (FieldType::ProductList, ResponseValue::Products(_)) => Ok(()),
        _ => Err(AppError::validation(format!(
            "{}: value shape does not match field type",
            field.label
        ))),
    }
}

pub struct EnquiryService {
    store: StoreHandle,
}

impl EnquiryService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    // ── Field definitions ───────────────────────────────────────────

    pub async fn create_field(&self, payload: EnquiryFieldCreate) -> AppResult<EnquiryField> {
        validate_required_text(&payload.label, "label", MAX_NAME_LEN)?;
        let field = EnquiryField {
            id: new_id(),
            label: payload.label,
            field_type: payload.field_type,
            options: payload.options,
            is_required: payload.is_required,
            show_conditional_on: payload.show_conditional_on,
            conditional_value: payload.conditional_value,
            display_order: payload.display_order,
            is_active: true,
        };
        self.store.insert_model(Entity::EnquiryFields, &field).await?;
        tracing::info!(label = %field.label, "enquiry field created");
        Ok(field)
    }

    pub async fn update_field(&self, field_id: &str, payload: EnquiryFieldUpdate) -> AppResult<()> {
        let mut fields = Map::new();
        if let Some(label) = payload.label {
            validate_required_text(&label, "label", MAX_NAME_LEN)?;
            fields.insert("label".into(), json!(label));
        }
        if let Some(options) = payload.options {
            fields.insert("options".into(), json!(options));
        }
        if let Some(required) = payload.is_required {
            fields.insert("is_required".into(), json!(required));
        }
        if let Some(controller) = payload.show_conditional_on {
            fields.insert("show_conditional_on".into(), json!(controller));
        }
        if let Some(expected) = payload.conditional_value {
            fields.insert("conditional_value".into(), json!(expected));
        }
        if let Some(order) = payload.display_order {
            fields.insert("display_order".into(), json!(order));
        }
        if let Some(active) = payload.is_active {
            fields.insert("is_active".into(), json!(active));
        }
        if fields.is_empty() {
            return Ok(());
        }
        self.store
            .update(Entity::EnquiryFields, field_id, Value::Object(fields))
            .await?;
        Ok(())
    }

    pub async fn delete_field(&self, field_id: &str) -> AppResult<()> {
        self.store.delete(Entity::EnquiryFields, field_id).await?;
        Ok(())
    }

    /// Active field definitions in display order.
    pub async fn active_fields(&self) -> AppResult<Vec<EnquiryField>> {
        self.store
            .fetch_all(
                Entity::EnquiryFields,
                Filter::eq("is_active", true),
                Order::asc("display_order"),
            )
            .await
    }

    // ── Enquiries ───────────────────────────────────────────────────

    /// Validate and persist a submitted enquiry.
    pub async fn submit(&self, payload: EnquiryCreate) -> AppResult<Enquiry> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&payload.mobile, "mobile", MAX_SHORT_TEXT_LEN)?;
        let fields = self.active_fields().await?;
        validate_responses(&fields, &payload.responses)?;

        let enquiry = Enquiry {
            id: new_id(),
            name: payload.name,
            mobile: payload.mobile,
            panchayath_id: payload.panchayath_id,
            ward_id: payload.ward_id,
            responses: payload.responses,
            created_at: now_millis(),
        };
        self.store.insert_model(Entity::Enquiries, &enquiry).await?;
        tracing::info!(enquiry = %enquiry.id, "enquiry submitted");
        Ok(enquiry)
    }

    /// All enquiries, newest first. Each stored blob is re-validated
    /// against the current definitions; enquiries whose blob no longer
    /// conforms are returned with the validation error instead of
    /// being silently trusted.
    pub async fn enquiries(&self) -> AppResult<Vec<(Enquiry, AppResult<()>)>> {
        let fields = self.active_fields().await?;
        let enquiries: Vec<Enquiry> = self
            .store
            .fetch_all(Entity::Enquiries, Filter::all(), Order::desc("created_at"))
            .await?;
        Ok(enquiries
            .into_iter()
            .map(|e| {
                let check = validate_responses(&fields, &e.responses);
                (e, check)
            })
            .collect())
    }
}
