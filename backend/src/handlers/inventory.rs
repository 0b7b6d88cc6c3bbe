use axum::extract::State;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    handlers::common::{parse_optional_enum, ApiResponse, ApiResult, AppJson, AppPath, AppQuery},
    models::inventory::{
        Batch, BatchDetail, BatchPayload, BatchStatus, BatchStatusPayload, BomLine, Component,
        ComponentPayload, Product, ProductDetail, ProductPayload, ReplaceBomPayload, Supplier,
        SupplierPayload,
    },
    repositories::{
        BatchRepository, ComponentRepository, ProductRepository, Repository, SupplierRepository,
    },
    state::AppState,
    types::{BatchId, ComponentId, ProductId, SupplierId},
    utils::today_local,
    validation::validate_payload,
};

// ============================================================================
// Suppliers
// ============================================================================

pub async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Vec<Supplier>> {
    let suppliers = SupplierRepository::new().find_all(&state.pool).await?;
    Ok(ApiResponse::ok(suppliers))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    AppPath(id): AppPath<SupplierId>,
) -> ApiResult<Supplier> {
    let supplier = SupplierRepository::new().find_by_id(&state.pool, id).await?;
    Ok(ApiResponse::ok(supplier))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SupplierPayload>,
) -> ApiResult<Supplier> {
    validate_payload(&payload)?;
    let supplier = Supplier::from_payload(payload);
    let saved = SupplierRepository::new().create(&state.pool, &supplier).await?;
    Ok(ApiResponse::created(saved).with_message("Supplier created"))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    AppPath(id): AppPath<SupplierId>,
    AppJson(payload): AppJson<SupplierPayload>,
) -> ApiResult<Supplier> {
    validate_payload(&payload)?;
    let repo = SupplierRepository::new();
    let mut supplier = repo.find_by_id(&state.pool, id).await?;
    supplier.apply(payload);
    let saved = repo.update(&state.pool, &supplier).await?;
    Ok(ApiResponse::ok(saved).with_message("Supplier updated"))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    AppPath(id): AppPath<SupplierId>,
) -> ApiResult<Option<()>> {
    SupplierRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Supplier deleted"))
}

// ============================================================================
// Components
// ============================================================================

pub async fn list_components(State(state): State<AppState>) -> ApiResult<Vec<Component>> {
    let components = ComponentRepository::new().find_all(&state.pool).await?;
    Ok(ApiResponse::ok(components))
}

pub async fn get_component(
    State(state): State<AppState>,
    AppPath(id): AppPath<ComponentId>,
) -> ApiResult<Component> {
    let component = ComponentRepository::new().find_by_id(&state.pool, id).await?;
    Ok(ApiResponse::ok(component))
}

pub async fn create_component(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ComponentPayload>,
) -> ApiResult<Component> {
    validate_payload(&payload)?;
    let component = Component::from_payload(payload);
    let saved = ComponentRepository::new().create(&state.pool, &component).await?;
    Ok(ApiResponse::created(saved).with_message("Component created"))
}

pub async fn update_component(
    State(state): State<AppState>,
    AppPath(id): AppPath<ComponentId>,
    AppJson(payload): AppJson<ComponentPayload>,
) -> ApiResult<Component> {
    validate_payload(&payload)?;
    let repo = ComponentRepository::new();
    let mut component = repo.find_by_id(&state.pool, id).await?;
    component.apply(payload);
    let saved = repo.update(&state.pool, &component).await?;
    if saved.is_low_stock() {
        tracing::debug!(component_id = %saved.id, stock = saved.stock_quantity, "Component at or below reorder level");
    }
    Ok(ApiResponse::ok(saved).with_message("Component updated"))
}

pub async fn delete_component(
    State(state): State<AppState>,
    AppPath(id): AppPath<ComponentId>,
) -> ApiResult<Option<()>> {
    ComponentRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Component deleted"))
}

// ============================================================================
// Products and bill of materials
// ============================================================================

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = ProductRepository::new().find_all(&state.pool).await?;
    Ok(ApiResponse::ok(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
) -> ApiResult<ProductDetail> {
    let repo = ProductRepository::new();
    let product = repo.find_by_id(&state.pool, id).await?;
    let components = repo.list_components(&state.pool, id).await?;
    Ok(ApiResponse::ok(ProductDetail {
        product,
        components,
    }))
}

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductPayload>,
) -> ApiResult<Product> {
    validate_payload(&payload)?;
    let product = Product::from_payload(payload);
    let saved = ProductRepository::new().create(&state.pool, &product).await?;
    Ok(ApiResponse::created(saved).with_message("Product created"))
}

pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
    AppJson(payload): AppJson<ProductPayload>,
) -> ApiResult<Product> {
    validate_payload(&payload)?;
    let repo = ProductRepository::new();
    let mut product = repo.find_by_id(&state.pool, id).await?;
    product.apply(payload);
    let saved = repo.update(&state.pool, &product).await?;
    Ok(ApiResponse::ok(saved).with_message("Product updated"))
}

pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
) -> ApiResult<Option<()>> {
    ProductRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Product deleted"))
}

pub async fn list_product_components(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
) -> ApiResult<Vec<BomLine>> {
    let repo = ProductRepository::new();
    repo.find_by_id(&state.pool, id).await?;
    let lines = repo.list_components(&state.pool, id).await?;
    Ok(ApiResponse::ok(lines))
}

/// Replaces the bill of materials; unknown component ids fail with `409`.
pub async fn replace_product_components(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
    AppJson(payload): AppJson<ReplaceBomPayload>,
) -> ApiResult<Vec<BomLine>> {
    validate_payload(&payload)?;
    let repo = ProductRepository::new();
    repo.find_by_id(&state.pool, id).await?;
    let lines = repo
        .replace_components(&state.pool, id, &payload.components)
        .await?;
    Ok(ApiResponse::ok(lines).with_message("Bill of materials saved"))
}

// ============================================================================
// Batches
// ============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BatchListQuery {
    /// `in-transit`, `processing` or `completed`.
    pub status: Option<String>,
}

pub async fn list_batches(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BatchListQuery>,
) -> ApiResult<Vec<Batch>> {
    let status = parse_optional_enum(query.status.as_deref(), "status")?;
    let batches = BatchRepository::new().list(&state.pool, status).await?;
    Ok(ApiResponse::ok(batches))
}

pub async fn get_batch(
    State(state): State<AppState>,
    AppPath(id): AppPath<BatchId>,
) -> ApiResult<BatchDetail> {
    let repo = BatchRepository::new();
    let batch = repo.find_by_id(&state.pool, id).await?;
    let items = repo.list_items(&state.pool, id).await?;
    Ok(ApiResponse::ok(BatchDetail { batch, items }))
}

pub async fn create_batch(
    State(state): State<AppState>,
    AppJson(payload): AppJson<BatchPayload>,
) -> ApiResult<BatchDetail> {
    validate_payload(&payload)?;
    SupplierRepository::new()
        .find_by_id(&state.pool, payload.supplier_id)
        .await?;
    let batch = Batch::from_payload(&payload);
    let (batch, items) = BatchRepository::new()
        .create_with_items(&state.pool, &batch, &payload.items)
        .await?;
    tracing::info!(batch_id = %batch.id, code = %batch.batch_code, "Batch created");
    Ok(ApiResponse::created(BatchDetail { batch, items }).with_message("Batch created"))
}

pub async fn update_batch(
    State(state): State<AppState>,
    AppPath(id): AppPath<BatchId>,
    AppJson(payload): AppJson<BatchPayload>,
) -> ApiResult<BatchDetail> {
    validate_payload(&payload)?;
    let repo = BatchRepository::new();
    let mut batch = repo.find_by_id(&state.pool, id).await?;
    if batch.status == BatchStatus::Completed {
        return Err(AppError::Conflict("Completed batches cannot be edited".into()));
    }
    batch.apply(&payload);
    let (batch, items) = repo
        .update_with_items(&state.pool, &batch, &payload.items)
        .await?;
    Ok(ApiResponse::ok(BatchDetail { batch, items }).with_message("Batch updated"))
}

pub async fn delete_batch(
    State(state): State<AppState>,
    AppPath(id): AppPath<BatchId>,
) -> ApiResult<Option<()>> {
    BatchRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Batch deleted"))
}

pub async fn update_batch_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<BatchId>,
    AppJson(payload): AppJson<BatchStatusPayload>,
) -> ApiResult<Batch> {
    let repo = BatchRepository::new();
    let batch = repo.find_by_id(&state.pool, id).await?;
    let next = batch
        .status
        .transition_to(payload.status)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let today = today_local(&state.config.time_zone);
    let saved = repo.apply_status(&state.pool, &batch, next, today).await?;
    Ok(ApiResponse::ok(saved).with_message(format!("Batch moved to {}", next.as_str())))
}
