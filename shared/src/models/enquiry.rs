//! Enquiry Model
//!
//! Admin-configurable intake form: field definitions with conditional
//! visibility, and submitted enquiries whose `responses` blob is a
//! loosely-typed mapping validated against the active definitions at
//! read time, never assumed well-typed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported enquiry field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    Checkbox,
    ProductList,
}

/// Enquiry field definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryField {
    pub id: String,
    pub label: String,
    pub field_type: FieldType,
    /// Choices for `select`/`checkbox` fields
    pub options: Vec<String>,
    pub is_required: bool,
    /// Field id this one's visibility depends on, if any
    pub show_conditional_on: Option<String>,
    /// Value the controlling field must hold for this one to show
    pub conditional_value: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

/// Create field payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryFieldCreate {
    pub label: String,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub is_required: bool,
    pub show_conditional_on: Option<String>,
    pub conditional_value: Option<String>,
    pub display_order: i32,
}

/// Update field payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnquiryFieldUpdate {
    pub label: Option<String>,
    pub options: Option<Vec<String>>,
    pub is_required: Option<bool>,
    pub show_conditional_on: Option<Option<String>>,
    pub conditional_value: Option<Option<String>>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Product row inside a `product_list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryProduct {
    pub name: String,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

/// One submitted value, tagged by shape rather than trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Text(String),
    Multi(Vec<String>),
    Products(Vec<EnquiryProduct>),
}

impl ResponseValue {
    /// Whether the value carries any content at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Multi(v) => v.is_empty(),
            Self::Products(v) => v.is_empty(),
        }
    }

    /// The value as a plain string, for conditional-visibility matching.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Submitted enquiry entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub panchayath_id: Option<String>,
    pub ward_id: Option<String>,
    /// Field id -> submitted value
    pub responses: BTreeMap<String, ResponseValue>,
    pub created_at: i64,
}

/// Create enquiry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryCreate {
    pub name: String,
    pub mobile: String,
    pub panchayath_id: Option<String>,
    pub ward_id: Option<String>,
    pub responses: BTreeMap<String, ResponseValue>,
}
