//! Inventory repositories: suppliers, components, products with their bill
//! of materials, and import batches.

use crate::error::AppError;
use crate::models::inventory::{
    Batch, BatchItem, BatchItemPayload, BatchStatus, BomLine, BomLinePayload, Component, Product,
    Supplier,
};
use crate::repositories::common::{ensure_affected, push_clause};
use crate::repositories::repository::Repository;
use crate::repositories::transaction::{begin_transaction, commit_transaction};
use crate::types::{BatchId, ComponentId, ProductId, SupplierId};
use chrono::{NaiveDate, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

const SUPPLIER_TABLE: &str = "suppliers";
const SUPPLIER_COLUMNS: &str =
    "id, name, contact_name, email, phone, address, created_at, updated_at";

const COMPONENT_TABLE: &str = "components";
const COMPONENT_COLUMNS: &str = "id, sku, name, unit, stock_quantity, reorder_level, unit_cost, \
     supplier_id, image_url, created_at, updated_at";

const PRODUCT_TABLE: &str = "products";
const PRODUCT_COLUMNS: &str =
    "id, sku, name, description, price, image_url, created_at, updated_at";

const BOM_TABLE: &str = "product_components";
const BOM_COLUMNS: &str = "product_id, component_id, quantity";

const BATCH_TABLE: &str = "batches";
const BATCH_COLUMNS: &str = "id, batch_code, supplier_id, status, expected_date, received_date, \
     notes, created_at, updated_at";

const BATCH_ITEM_TABLE: &str = "batch_items";
const BATCH_ITEM_COLUMNS: &str = "batch_id, component_id, quantity";

// ============================================================================
// Suppliers
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct SupplierRepository;

impl SupplierRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Repository<Supplier> for SupplierRepository {
    const TABLE: &'static str = SUPPLIER_TABLE;
    type Id = SupplierId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Supplier>, AppError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY name ASC",
            SUPPLIER_COLUMNS, SUPPLIER_TABLE
        );
        let rows = sqlx::query_as::<_, Supplier>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: SupplierId) -> Result<Supplier, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            SUPPLIER_COLUMNS, SUPPLIER_TABLE
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Supplier not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &Supplier) -> Result<Supplier, AppError> {
        let query = format!(
            "INSERT INTO {} (id, name, contact_name, email, phone, address, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            SUPPLIER_TABLE, SUPPLIER_COLUMNS
        );
        let row = sqlx::query_as::<_, Supplier>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.contact_name)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.address)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Supplier) -> Result<Supplier, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, contact_name = $3, email = $4, phone = $5, address = $6, \
             updated_at = $7 WHERE id = $1 RETURNING {}",
            SUPPLIER_TABLE, SUPPLIER_COLUMNS
        );
        let row = sqlx::query_as::<_, Supplier>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.contact_name)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.address)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: SupplierId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", SUPPLIER_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Supplier")
    }
}

// ============================================================================
// Components
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentRepository;

impl ComponentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn is_used_in_bom(&self, db: &PgPool, id: ComponentId) -> Result<bool, AppError> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE component_id = $1)",
            BOM_TABLE
        );
        let used = sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(used)
    }

    pub async fn add_stock(
        &self,
        conn: &mut PgConnection,
        id: ComponentId,
        quantity: i32,
    ) -> Result<(), AppError> {
        let query = format!(
            "UPDATE {} SET stock_quantity = stock_quantity + $2, updated_at = $3 WHERE id = $1",
            COMPONENT_TABLE
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(quantity)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await?;
        ensure_affected(result, "Component")
    }
}

impl Repository<Component> for ComponentRepository {
    const TABLE: &'static str = COMPONENT_TABLE;
    type Id = ComponentId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Component>, AppError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY name ASC",
            COMPONENT_COLUMNS, COMPONENT_TABLE
        );
        let rows = sqlx::query_as::<_, Component>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: ComponentId) -> Result<Component, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            COMPONENT_COLUMNS, COMPONENT_TABLE
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Component not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &Component) -> Result<Component, AppError> {
        let query = format!(
            "INSERT INTO {} (id, sku, name, unit, stock_quantity, reorder_level, unit_cost, \
             supplier_id, image_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            COMPONENT_TABLE, COMPONENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Component>(&query)
            .bind(item.id)
            .bind(&item.sku)
            .bind(&item.name)
            .bind(&item.unit)
            .bind(item.stock_quantity)
            .bind(item.reorder_level)
            .bind(item.unit_cost)
            .bind(item.supplier_id)
            .bind(&item.image_url)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Component) -> Result<Component, AppError> {
        let query = format!(
            "UPDATE {} SET sku = $2, name = $3, unit = $4, stock_quantity = $5, \
             reorder_level = $6, unit_cost = $7, supplier_id = $8, image_url = $9, \
             updated_at = $10 WHERE id = $1 RETURNING {}",
            COMPONENT_TABLE, COMPONENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Component>(&query)
            .bind(item.id)
            .bind(&item.sku)
            .bind(&item.name)
            .bind(&item.unit)
            .bind(item.stock_quantity)
            .bind(item.reorder_level)
            .bind(item.unit_cost)
            .bind(item.supplier_id)
            .bind(&item.image_url)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    /// Components referenced by a bill of materials are kept.
    async fn delete(&self, db: &PgPool, id: ComponentId) -> Result<(), AppError> {
        if self.is_used_in_bom(db, id).await? {
            return Err(AppError::Conflict(
                "Component is used by a product bill of materials".into(),
            ));
        }
        let query = format!("DELETE FROM {} WHERE id = $1", COMPONENT_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Component")
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_components(
        &self,
        db: &PgPool,
        product_id: ProductId,
    ) -> Result<Vec<BomLine>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE product_id = $1 ORDER BY component_id",
            BOM_COLUMNS, BOM_TABLE
        );
        let rows = sqlx::query_as::<_, BomLine>(&query)
            .bind(product_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Replaces the whole bill of materials in one transaction.
    pub async fn replace_components(
        &self,
        db: &PgPool,
        product_id: ProductId,
        lines: &[BomLinePayload],
    ) -> Result<Vec<BomLine>, AppError> {
        let mut tx = begin_transaction(db).await?;
        let delete = format!("DELETE FROM {} WHERE product_id = $1", BOM_TABLE);
        sqlx::query(&delete)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3) RETURNING {}",
            BOM_TABLE, BOM_COLUMNS, BOM_COLUMNS
        );
        let mut saved = Vec::with_capacity(lines.len());
        for line in lines {
            let row = sqlx::query_as::<_, BomLine>(&insert)
                .bind(product_id)
                .bind(line.component_id)
                .bind(line.quantity)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }
        commit_transaction(tx).await?;
        Ok(saved)
    }
}

impl Repository<Product> for ProductRepository {
    const TABLE: &'static str = PRODUCT_TABLE;
    type Id = ProductId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Product>, AppError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY name ASC",
            PRODUCT_COLUMNS, PRODUCT_TABLE
        );
        let rows = sqlx::query_as::<_, Product>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: ProductId) -> Result<Product, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            PRODUCT_COLUMNS, PRODUCT_TABLE
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &Product) -> Result<Product, AppError> {
        let query = format!(
            "INSERT INTO {} (id, sku, name, description, price, image_url, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            PRODUCT_TABLE, PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(item.id)
            .bind(&item.sku)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(&item.image_url)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Product) -> Result<Product, AppError> {
        let query = format!(
            "UPDATE {} SET sku = $2, name = $3, description = $4, price = $5, image_url = $6, \
             updated_at = $7 WHERE id = $1 RETURNING {}",
            PRODUCT_TABLE, PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(item.id)
            .bind(&item.sku)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(&item.image_url)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    /// BOM lines cascade with the product.
    async fn delete(&self, db: &PgPool, id: ProductId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", PRODUCT_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Product")
    }
}

// ============================================================================
// Batches
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct BatchRepository;

impl BatchRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        db: &PgPool,
        status: Option<BatchStatus>,
    ) -> Result<Vec<Batch>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            BATCH_COLUMNS, BATCH_TABLE
        ));
        let mut has_clause = false;
        if let Some(status) = status {
            push_clause(&mut builder, &mut has_clause);
            builder.push("status = ").push_bind(status);
        }
        builder.push(" ORDER BY created_at DESC");
        let rows = builder.build_query_as::<Batch>().fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn list_items(&self, db: &PgPool, batch_id: BatchId) -> Result<Vec<BatchItem>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE batch_id = $1 ORDER BY component_id",
            BATCH_ITEM_COLUMNS, BATCH_ITEM_TABLE
        );
        let rows = sqlx::query_as::<_, BatchItem>(&query)
            .bind(batch_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn replace_items(
        &self,
        conn: &mut PgConnection,
        batch_id: BatchId,
        items: &[BatchItemPayload],
    ) -> Result<Vec<BatchItem>, AppError> {
        let delete = format!("DELETE FROM {} WHERE batch_id = $1", BATCH_ITEM_TABLE);
        sqlx::query(&delete)
            .bind(batch_id)
            .execute(&mut *conn)
            .await?;
        let insert = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3) RETURNING {}",
            BATCH_ITEM_TABLE, BATCH_ITEM_COLUMNS, BATCH_ITEM_COLUMNS
        );
        let mut saved = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, BatchItem>(&insert)
                .bind(batch_id)
                .bind(item.component_id)
                .bind(item.quantity)
                .fetch_one(&mut *conn)
                .await?;
            saved.push(row);
        }
        Ok(saved)
    }

    pub async fn create_with_items(
        &self,
        db: &PgPool,
        batch: &Batch,
        items: &[BatchItemPayload],
    ) -> Result<(Batch, Vec<BatchItem>), AppError> {
        let mut tx = begin_transaction(db).await?;
        let query = format!(
            "INSERT INTO {} (id, batch_code, supplier_id, status, expected_date, received_date, \
             notes, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            BATCH_TABLE, BATCH_COLUMNS
        );
        let saved = sqlx::query_as::<_, Batch>(&query)
            .bind(batch.id)
            .bind(&batch.batch_code)
            .bind(batch.supplier_id)
            .bind(batch.status)
            .bind(batch.expected_date)
            .bind(batch.received_date)
            .bind(&batch.notes)
            .bind(batch.created_at)
            .bind(batch.updated_at)
            .fetch_one(&mut *tx)
            .await?;
        let saved_items = self.replace_items(&mut tx, batch.id, items).await?;
        commit_transaction(tx).await?;
        Ok((saved, saved_items))
    }

    pub async fn update_with_items(
        &self,
        db: &PgPool,
        batch: &Batch,
        items: &[BatchItemPayload],
    ) -> Result<(Batch, Vec<BatchItem>), AppError> {
        let mut tx = begin_transaction(db).await?;
        let query = format!(
            "UPDATE {} SET batch_code = $2, supplier_id = $3, expected_date = $4, notes = $5, \
             updated_at = $6 WHERE id = $1 AND status <> 'completed' RETURNING {}",
            BATCH_TABLE, BATCH_COLUMNS
        );
        let saved = sqlx::query_as::<_, Batch>(&query)
            .bind(batch.id)
            .bind(&batch.batch_code)
            .bind(batch.supplier_id)
            .bind(batch.expected_date)
            .bind(&batch.notes)
            .bind(batch.updated_at)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Conflict("Completed batches cannot be edited".into()))?;
        let saved_items = self.replace_items(&mut tx, batch.id, items).await?;
        commit_transaction(tx).await?;
        Ok((saved, saved_items))
    }

    /// Moves the batch to `next`. Completion stamps `received_date` (unless
    /// already set) and adds every item quantity to component stock.
    pub async fn apply_status(
        &self,
        db: &PgPool,
        batch: &Batch,
        next: BatchStatus,
        today: NaiveDate,
    ) -> Result<Batch, AppError> {
        let mut tx = begin_transaction(db).await?;
        let received_date = match next {
            BatchStatus::Completed => batch.received_date.or(Some(today)),
            _ => batch.received_date,
        };
        let query = format!(
            "UPDATE {} SET status = $3, received_date = $4, updated_at = $5 \
             WHERE id = $1 AND status = $2 RETURNING {}",
            BATCH_TABLE, BATCH_COLUMNS
        );
        let saved = sqlx::query_as::<_, Batch>(&query)
            .bind(batch.id)
            .bind(batch.status)
            .bind(next)
            .bind(received_date)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Conflict("Batch status changed concurrently".into()))?;

        if next == BatchStatus::Completed {
            let items_query = format!(
                "SELECT {} FROM {} WHERE batch_id = $1",
                BATCH_ITEM_COLUMNS, BATCH_ITEM_TABLE
            );
            let items = sqlx::query_as::<_, BatchItem>(&items_query)
                .bind(batch.id)
                .fetch_all(&mut *tx)
                .await?;
            let components = ComponentRepository::new();
            for item in &items {
                components
                    .add_stock(&mut tx, item.component_id, item.quantity)
                    .await?;
            }
            tracing::info!(
                batch_id = %batch.id,
                items = items.len(),
                "Batch completed; component stock updated"
            );
        }
        commit_transaction(tx).await?;
        Ok(saved)
    }

    pub async fn find_by_id(&self, db: &PgPool, id: BatchId) -> Result<Batch, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", BATCH_COLUMNS, BATCH_TABLE);
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found".into()))
    }

    /// Items cascade with the batch. Completed batches are kept.
    pub async fn delete(&self, db: &PgPool, id: BatchId) -> Result<(), AppError> {
        let batch = self.find_by_id(db, id).await?;
        if batch.status == BatchStatus::Completed {
            return Err(AppError::Conflict(
                "Completed batches cannot be deleted".into(),
            ));
        }
        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND status <> 'completed'",
            BATCH_TABLE
        );
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Batch")
    }
}
