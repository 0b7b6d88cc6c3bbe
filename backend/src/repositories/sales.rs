//! Sales repositories: customers and orders with their line items.

use crate::error::AppError;
use crate::models::sales::{Customer, Order, OrderItem, OrderItemPayload, OrderStatus};
use crate::repositories::common::{ensure_affected, push_clause};
use crate::repositories::repository::Repository;
use crate::repositories::transaction::{begin_transaction, commit_transaction};
use crate::types::{CustomerId, OrderId};
use chrono::Utc;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

const CUSTOMER_TABLE: &str = "customers";
const CUSTOMER_COLUMNS: &str =
    "id, name, email, phone, company, address, created_at, updated_at";

const ORDER_TABLE: &str = "orders";
const ORDER_COLUMNS: &str = "id, order_number, customer_id, order_date, status, \
     discount_percent, tax_percent, notes, created_at, updated_at";

const ORDER_ITEM_TABLE: &str = "order_items";
const ORDER_ITEM_COLUMNS: &str = "order_id, product_id, quantity, unit_price";

// ============================================================================
// Customers
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerRepository;

impl CustomerRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Repository<Customer> for CustomerRepository {
    const TABLE: &'static str = CUSTOMER_TABLE;
    type Id = CustomerId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Customer>, AppError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY name ASC",
            CUSTOMER_COLUMNS, CUSTOMER_TABLE
        );
        let rows = sqlx::query_as::<_, Customer>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: CustomerId) -> Result<Customer, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            CUSTOMER_COLUMNS, CUSTOMER_TABLE
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &Customer) -> Result<Customer, AppError> {
        let query = format!(
            "INSERT INTO {} (id, name, email, phone, company, address, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            CUSTOMER_TABLE, CUSTOMER_COLUMNS
        );
        let row = sqlx::query_as::<_, Customer>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.company)
            .bind(&item.address)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Customer) -> Result<Customer, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, email = $3, phone = $4, company = $5, address = $6, \
             updated_at = $7 WHERE id = $1 RETURNING {}",
            CUSTOMER_TABLE, CUSTOMER_COLUMNS
        );
        let row = sqlx::query_as::<_, Customer>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.company)
            .bind(&item.address)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: CustomerId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", CUSTOMER_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Customer")
    }
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct OrderFilters {
    pub customer_id: Option<CustomerId>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(&self, db: &PgPool, filters: &OrderFilters) -> Result<Vec<Order>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            ORDER_COLUMNS, ORDER_TABLE
        ));
        let mut has_clause = false;
        if let Some(customer_id) = filters.customer_id {
            push_clause(&mut builder, &mut has_clause);
            builder.push("customer_id = ").push_bind(customer_id);
        }
        if let Some(status) = filters.status {
            push_clause(&mut builder, &mut has_clause);
            builder.push("status = ").push_bind(status);
        }
        builder.push(" ORDER BY order_date DESC, created_at DESC");
        let rows = builder.build_query_as::<Order>().fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn list_items(&self, db: &PgPool, order_id: OrderId) -> Result<Vec<OrderItem>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE order_id = $1 ORDER BY product_id",
            ORDER_ITEM_COLUMNS, ORDER_ITEM_TABLE
        );
        let rows = sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Items for many orders at once, used to compute list totals.
    pub async fn list_items_for(
        &self,
        db: &PgPool,
        order_ids: &[OrderId],
    ) -> Result<Vec<OrderItem>, AppError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<uuid::Uuid> = order_ids.iter().map(|id| *id.as_uuid()).collect();
        let query = format!(
            "SELECT {} FROM {} WHERE order_id = ANY($1)",
            ORDER_ITEM_COLUMNS, ORDER_ITEM_TABLE
        );
        let rows = sqlx::query_as::<_, OrderItem>(&query)
            .bind(ids)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn replace_items(
        &self,
        conn: &mut PgConnection,
        order_id: OrderId,
        items: &[OrderItemPayload],
    ) -> Result<Vec<OrderItem>, AppError> {
        let delete = format!("DELETE FROM {} WHERE order_id = $1", ORDER_ITEM_TABLE);
        sqlx::query(&delete)
            .bind(order_id)
            .execute(&mut *conn)
            .await?;
        let insert = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4) RETURNING {}",
            ORDER_ITEM_TABLE, ORDER_ITEM_COLUMNS, ORDER_ITEM_COLUMNS
        );
        let mut saved = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(&insert)
                .bind(order_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .bind(item.unit_price)
                .fetch_one(&mut *conn)
                .await?;
            saved.push(row);
        }
        Ok(saved)
    }

    pub async fn create_with_items(
        &self,
        db: &PgPool,
        order: &Order,
        items: &[OrderItemPayload],
    ) -> Result<(Order, Vec<OrderItem>), AppError> {
        let mut tx = begin_transaction(db).await?;
        let query = format!(
            "INSERT INTO {} (id, order_number, customer_id, order_date, status, \
             discount_percent, tax_percent, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            ORDER_TABLE, ORDER_COLUMNS
        );
        let saved = sqlx::query_as::<_, Order>(&query)
            .bind(order.id)
            .bind(&order.order_number)
            .bind(order.customer_id)
            .bind(order.order_date)
            .bind(order.status)
            .bind(order.discount_percent)
            .bind(order.tax_percent)
            .bind(&order.notes)
            .bind(order.created_at)
            .bind(order.updated_at)
            .fetch_one(&mut *tx)
            .await?;
        let saved_items = self.replace_items(&mut tx, order.id, items).await?;
        commit_transaction(tx).await?;
        Ok((saved, saved_items))
    }

    /// Rewrites a pending order and its items.
    pub async fn update_with_items(
        &self,
        db: &PgPool,
        order: &Order,
        items: &[OrderItemPayload],
    ) -> Result<(Order, Vec<OrderItem>), AppError> {
        let mut tx = begin_transaction(db).await?;
        let query = format!(
            "UPDATE {} SET customer_id = $2, order_date = $3, discount_percent = $4, \
             tax_percent = $5, notes = $6, updated_at = $7, order_number = $8 \
             WHERE id = $1 AND status = 'pending' RETURNING {}",
            ORDER_TABLE, ORDER_COLUMNS
        );
        let saved = sqlx::query_as::<_, Order>(&query)
            .bind(order.id)
            .bind(order.customer_id)
            .bind(order.order_date)
            .bind(order.discount_percent)
            .bind(order.tax_percent)
            .bind(&order.notes)
            .bind(order.updated_at)
            .bind(&order.order_number)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Conflict("Only pending orders can be edited".into()))?;
        let saved_items = self.replace_items(&mut tx, order.id, items).await?;
        commit_transaction(tx).await?;
        Ok((saved, saved_items))
    }

    pub async fn update_status(
        &self,
        db: &PgPool,
        order: &Order,
        next: OrderStatus,
    ) -> Result<Order, AppError> {
        let query = format!(
            "UPDATE {} SET status = $3, updated_at = $4 WHERE id = $1 AND status = $2 \
             RETURNING {}",
            ORDER_TABLE, ORDER_COLUMNS
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order.id)
            .bind(order.status)
            .bind(next)
            .bind(Utc::now())
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::Conflict("Order status changed concurrently".into()))
    }

    pub async fn find_by_id(&self, db: &PgPool, id: OrderId) -> Result<Order, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", ORDER_COLUMNS, ORDER_TABLE);
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))
    }

    /// Items cascade with the order.
    pub async fn delete(&self, db: &PgPool, id: OrderId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", ORDER_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Order")
    }
}
