use axum::extract::State;
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    handlers::common::{
        parse_optional_enum, parse_optional_id, ApiResponse, ApiResult, AppJson, AppPath,
        AppQuery,
    },
    models::sales::{
        Customer, CustomerPayload, Order, OrderDetail, OrderItem, OrderPayload,
        OrderStatusPayload,
    },
    repositories::{CustomerRepository, OrderFilters, OrderRepository, Repository},
    state::AppState,
    types::{CustomerId, OrderId},
    validation::validate_payload,
};

// ============================================================================
// Customers
// ============================================================================

pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    let customers = CustomerRepository::new().find_all(&state.pool).await?;
    Ok(ApiResponse::ok(customers))
}

pub async fn get_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<CustomerId>,
) -> ApiResult<Customer> {
    let customer = CustomerRepository::new().find_by_id(&state.pool, id).await?;
    Ok(ApiResponse::ok(customer))
}

pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CustomerPayload>,
) -> ApiResult<Customer> {
    validate_payload(&payload)?;
    let customer = Customer::from_payload(payload);
    let saved = CustomerRepository::new().create(&state.pool, &customer).await?;
    Ok(ApiResponse::created(saved).with_message("Customer created"))
}

pub async fn update_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<CustomerId>,
    AppJson(payload): AppJson<CustomerPayload>,
) -> ApiResult<Customer> {
    validate_payload(&payload)?;
    let repo = CustomerRepository::new();
    let mut customer = repo.find_by_id(&state.pool, id).await?;
    customer.apply(payload);
    let saved = repo.update(&state.pool, &customer).await?;
    Ok(ApiResponse::ok(saved).with_message("Customer updated"))
}

/// Customers with orders are kept (`409` from the foreign key).
pub async fn delete_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<CustomerId>,
) -> ApiResult<Option<()>> {
    CustomerRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Customer deleted"))
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OrderListQuery {
    pub customer_id: Option<String>,
    /// `pending`, `confirmed`, `shipped`, `delivered` or `cancelled`.
    pub status: Option<String>,
}

fn attach_items(orders: Vec<Order>, items: Vec<OrderItem>) -> Vec<OrderDetail> {
    let mut grouped: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
    for item in items {
        grouped.entry(item.order_id).or_default().push(item);
    }
    orders
        .into_iter()
        .map(|order| {
            let items = grouped.remove(&order.id).unwrap_or_default();
            OrderDetail::new(order, items)
        })
        .collect()
}

pub async fn list_orders(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OrderListQuery>,
) -> ApiResult<Vec<OrderDetail>> {
    let filters = OrderFilters {
        customer_id: parse_optional_id(query.customer_id.as_deref(), "customer_id")?,
        status: parse_optional_enum(query.status.as_deref(), "status")?,
    };
    let repo = OrderRepository::new();
    let orders = repo.list(&state.pool, &filters).await?;
    let ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
    let items = repo.list_items_for(&state.pool, &ids).await?;
    Ok(ApiResponse::ok(attach_items(orders, items)))
}

pub async fn get_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<OrderId>,
) -> ApiResult<OrderDetail> {
    let repo = OrderRepository::new();
    let order = repo.find_by_id(&state.pool, id).await?;
    let items = repo.list_items(&state.pool, id).await?;
    Ok(ApiResponse::ok(OrderDetail::new(order, items)))
}

pub async fn create_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<OrderPayload>,
) -> ApiResult<OrderDetail> {
    validate_payload(&payload)?;
    CustomerRepository::new()
        .find_by_id(&state.pool, payload.customer_id)
        .await?;
    let order = Order::from_payload(&payload);
    let (order, items) = OrderRepository::new()
        .create_with_items(&state.pool, &order, &payload.items)
        .await?;
    tracing::info!(order_id = %order.id, order_number = %order.order_number, "Order created");
    Ok(ApiResponse::created(OrderDetail::new(order, items)).with_message("Order created"))
}

pub async fn update_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<OrderId>,
    AppJson(payload): AppJson<OrderPayload>,
) -> ApiResult<OrderDetail> {
    validate_payload(&payload)?;
    let repo = OrderRepository::new();
    let mut order = repo.find_by_id(&state.pool, id).await?;
    if !order.status.is_editable() {
        return Err(AppError::Conflict("Only pending orders can be edited".into()));
    }
    order.apply(&payload);
    let (order, items) = repo
        .update_with_items(&state.pool, &order, &payload.items)
        .await?;
    Ok(ApiResponse::ok(OrderDetail::new(order, items)).with_message("Order updated"))
}

pub async fn delete_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<OrderId>,
) -> ApiResult<Option<()>> {
    OrderRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Order deleted"))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<OrderId>,
    AppJson(payload): AppJson<OrderStatusPayload>,
) -> ApiResult<OrderDetail> {
    let repo = OrderRepository::new();
    let order = repo.find_by_id(&state.pool, id).await?;
    let next = order
        .status
        .transition_to(payload.status)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let saved = repo.update_status(&state.pool, &order, next).await?;
    let items = repo.list_items(&state.pool, id).await?;
    tracing::info!(order_id = %id, status = next.as_str(), "Order status changed");
    Ok(ApiResponse::ok(OrderDetail::new(saved, items))
        .with_message(format!("Order {}", next.as_str())))
}
