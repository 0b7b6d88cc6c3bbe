//! Customers and sales orders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::types::{CustomerId, OrderId, ProductId};
use crate::validation::rules::validate_not_blank;

use super::normalize_optional;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerPayload {
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(max = 160))]
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    pub fn from_payload(payload: CustomerPayload) -> Self {
        let now = Utc::now();
        let mut customer = Self {
            id: CustomerId::new(),
            name: String::new(),
            email: None,
            phone: None,
            company: None,
            address: None,
            created_at: now,
            updated_at: now,
        };
        customer.apply(payload);
        customer
    }

    pub fn apply(&mut self, payload: CustomerPayload) {
        self.name = payload.name.trim().to_string();
        self.email = normalize_optional(payload.email).map(|e| e.to_lowercase());
        self.phone = normalize_optional(payload.phone);
        self.company = normalize_optional(payload.company);
        self.address = normalize_optional(payload.address);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Order status cannot change from {from} to {to}")]
pub struct OrderTransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Confirmed, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
        )
    }

    pub fn transition_to(&self, next: OrderStatus) -> Result<OrderStatus, OrderTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(OrderTransitionError {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub discount_percent: f64,
    pub tax_percent: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemPayload {
    pub product_id: ProductId,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
}

fn validate_order_items(payload: &OrderPayload) -> Result<(), ValidationError> {
    let items = &payload.items;
    if items.is_empty() {
        return Err(ValidationError::new("items_required"));
    }
    let mut seen = HashSet::new();
    if items.iter().all(|item| seen.insert(item.product_id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_product"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_order_items"))]
pub struct OrderPayload {
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub discount_percent: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[validate(nested)]
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderStatusPayload {
    pub status: OrderStatus,
}

/// `SO-YYYYMMDD-XXXXXX`: order date plus the first six hex digits of the id.
pub fn order_number(order_date: NaiveDate, id: OrderId) -> String {
    let hex = id.as_uuid().simple().to_string();
    format!(
        "SO-{}-{}",
        order_date.format("%Y%m%d"),
        hex[..6].to_uppercase()
    )
}

impl Order {
    pub fn from_payload(payload: &OrderPayload) -> Self {
        let now = Utc::now();
        let id = OrderId::new();
        Self {
            id,
            order_number: order_number(payload.order_date, id),
            customer_id: payload.customer_id,
            order_date: payload.order_date,
            status: OrderStatus::Pending,
            discount_percent: payload.discount_percent,
            tax_percent: payload.tax_percent,
            notes: normalize_optional(payload.notes.clone()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, payload: &OrderPayload) {
        self.customer_id = payload.customer_id;
        self.order_date = payload.order_date;
        self.order_number = order_number(self.order_date, self.id);
        self.discount_percent = payload.discount_percent;
        self.tax_percent = payload.tax_percent;
        self.notes = normalize_optional(payload.notes.clone());
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    pub fn compute(items: &[OrderItem], discount_percent: f64, tax_percent: f64) -> Self {
        let subtotal: f64 = items
            .iter()
            .map(|item| f64::from(item.quantity) * item.unit_price)
            .sum();
        let discount = subtotal * discount_percent / 100.0;
        let tax = (subtotal - discount) * tax_percent / 100.0;
        Self {
            subtotal,
            discount,
            tax,
            total: subtotal - discount + tax,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
}

impl OrderDetail {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let totals = OrderTotals::compute(&items, order.discount_percent, order.tax_percent);
        Self {
            order,
            items,
            totals,
        }
    }
}
