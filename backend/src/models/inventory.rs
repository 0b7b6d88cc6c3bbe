//! Inventory records: suppliers, components, products with their bill of
//! materials, and import batches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::types::{BatchId, ComponentId, ProductId, SupplierId};
use crate::validation::rules::{validate_code, validate_not_blank, validate_url_like};

use super::normalize_optional;

// ============================================================================
// Suppliers
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SupplierPayload {
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 120))]
    #[serde(default)]
    pub contact_name: Option<String>,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Supplier {
    pub fn from_payload(payload: SupplierPayload) -> Self {
        let now = Utc::now();
        let mut supplier = Self {
            id: SupplierId::new(),
            name: String::new(),
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        };
        supplier.apply(payload);
        supplier
    }

    pub fn apply(&mut self, payload: SupplierPayload) {
        self.name = payload.name.trim().to_string();
        self.contact_name = normalize_optional(payload.contact_name);
        self.email = normalize_optional(payload.email).map(|e| e.to_lowercase());
        self.phone = normalize_optional(payload.phone);
        self.address = normalize_optional(payload.address);
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// Components
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Component {
    pub id: ComponentId,
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub unit_cost: f64,
    pub supplier_id: Option<SupplierId>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ComponentPayload {
    #[validate(custom(function = "validate_code"))]
    pub sku: String,
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock_quantity: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub reorder_level: i32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    #[validate(custom(function = "validate_url_like"))]
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Component {
    pub fn from_payload(payload: ComponentPayload) -> Self {
        let now = Utc::now();
        let mut component = Self {
            id: ComponentId::new(),
            sku: String::new(),
            name: String::new(),
            unit: String::new(),
            stock_quantity: 0,
            reorder_level: 0,
            unit_cost: 0.0,
            supplier_id: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        component.apply(payload);
        component
    }

    pub fn apply(&mut self, payload: ComponentPayload) {
        self.sku = payload.sku.trim().to_uppercase();
        self.name = payload.name.trim().to_string();
        self.unit = payload.unit.trim().to_string();
        self.stock_quantity = payload.stock_quantity;
        self.reorder_level = payload.reorder_level;
        self.unit_cost = payload.unit_cost;
        self.supplier_id = payload.supplier_id;
        self.image_url = normalize_optional(payload.image_url);
        self.updated_at = Utc::now();
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.reorder_level
    }
}

// ============================================================================
// Products and bill of materials
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(custom(function = "validate_code"))]
    pub sku: String,
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(custom(function = "validate_url_like"))]
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    pub fn from_payload(payload: ProductPayload) -> Self {
        let now = Utc::now();
        let mut product = Self {
            id: ProductId::new(),
            sku: String::new(),
            name: String::new(),
            description: None,
            price: 0.0,
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        product.apply(payload);
        product
    }

    pub fn apply(&mut self, payload: ProductPayload) {
        self.sku = payload.sku.trim().to_uppercase();
        self.name = payload.name.trim().to_string();
        self.description = normalize_optional(payload.description);
        self.price = payload.price;
        self.image_url = normalize_optional(payload.image_url);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BomLine {
    pub product_id: ProductId,
    pub component_id: ComponentId,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BomLinePayload {
    pub component_id: ComponentId,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

fn validate_unique_components(payload: &ReplaceBomPayload) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if payload.components.iter().all(|line| seen.insert(line.component_id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_component"))
    }
}

/// Full replacement of a product's bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_unique_components"))]
pub struct ReplaceBomPayload {
    #[validate(nested)]
    pub components: Vec<BomLinePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub components: Vec<BomLine>,
}

// ============================================================================
// Batches
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BatchStatus {
    #[default]
    InTransit,
    Processing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchTransitionError {
    #[error("Batch is already completed")]
    AlreadyCompleted,
    #[error("Batch status can only move from {from} to {expected}, not {requested}")]
    InvalidStep {
        from: &'static str,
        expected: &'static str,
        requested: &'static str,
    },
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::InTransit => "in-transit",
            BatchStatus::Processing => "processing",
            BatchStatus::Completed => "completed",
        }
    }

    pub fn next(&self) -> Option<BatchStatus> {
        match self {
            BatchStatus::InTransit => Some(BatchStatus::Processing),
            BatchStatus::Processing => Some(BatchStatus::Completed),
            BatchStatus::Completed => None,
        }
    }

    /// Validates a one-step forward move through the lifecycle.
    pub fn transition_to(&self, requested: BatchStatus) -> Result<BatchStatus, BatchTransitionError> {
        match self.next() {
            None => Err(BatchTransitionError::AlreadyCompleted),
            Some(expected) if expected == requested => Ok(requested),
            Some(expected) => Err(BatchTransitionError::InvalidStep {
                from: self.as_str(),
                expected: expected.as_str(),
                requested: requested.as_str(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Batch {
    pub id: BatchId,
    pub batch_code: String,
    pub supplier_id: SupplierId,
    pub status: BatchStatus,
    pub expected_date: Option<NaiveDate>,
    pub received_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BatchItem {
    pub batch_id: BatchId,
    pub component_id: ComponentId,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BatchItemPayload {
    pub component_id: ComponentId,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

fn validate_unique_batch_items(payload: &BatchPayload) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if payload.items.iter().all(|item| seen.insert(item.component_id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_component"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_unique_batch_items"))]
pub struct BatchPayload {
    #[validate(custom(function = "validate_code"))]
    pub batch_code: String,
    pub supplier_id: SupplierId,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<BatchItemPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchStatusPayload {
    pub status: BatchStatus,
}

impl Batch {
    pub fn from_payload(payload: &BatchPayload) -> Self {
        let now = Utc::now();
        Self {
            id: BatchId::new(),
            batch_code: payload.batch_code.trim().to_uppercase(),
            supplier_id: payload.supplier_id,
            status: BatchStatus::InTransit,
            expected_date: payload.expected_date,
            received_date: None,
            notes: normalize_optional(payload.notes.clone()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, payload: &BatchPayload) {
        self.batch_code = payload.batch_code.trim().to_uppercase();
        self.supplier_id = payload.supplier_id;
        self.expected_date = payload.expected_date;
        self.notes = normalize_optional(payload.notes.clone());
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchDetail {
    #[serde(flatten)]
    pub batch: Batch,
    pub items: Vec<BatchItem>,
}
