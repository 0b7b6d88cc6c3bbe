//! Back-office REST API: HR (employees, attendance, KSS training), inventory
//! and sales resources behind `{status, data, message}` envelopes.

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;

use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::Config, handlers as h, state::AppState};

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(24 * 60 * 60))
}

fn hr_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/employees",
            get(h::employees::list_employees).post(h::employees::create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(h::employees::get_employee)
                .put(h::employees::update_employee)
                .delete(h::employees::delete_employee),
        )
        .route(
            "/api/attendance",
            get(h::attendance::list_attendance).post(h::attendance::create_attendance),
        )
        .route(
            "/api/attendance/export",
            get(h::attendance::export_attendance),
        )
        .route(
            "/api/attendance/{id}",
            put(h::attendance::update_attendance).delete(h::attendance::delete_attendance),
        )
}

fn kss_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/kss/modules",
            get(h::kss::list_modules).post(h::kss::create_module),
        )
        .route(
            "/api/kss/modules/{id}",
            get(h::kss::get_module)
                .put(h::kss::update_module)
                .delete(h::kss::delete_module),
        )
        .route(
            "/api/kss/modules/{id}/lessons",
            get(h::kss::list_lessons).post(h::kss::create_lesson),
        )
        .route(
            "/api/kss/lessons/{id}",
            put(h::kss::update_lesson).delete(h::kss::delete_lesson),
        )
        .route(
            "/api/kss/lessons/{id}/questions",
            get(h::kss::list_questions).post(h::kss::create_question),
        )
        .route(
            "/api/kss/questions/{id}",
            axum::routing::delete(h::kss::delete_question),
        )
        .route(
            "/api/kss/lessons/{id}/submit",
            axum::routing::post(h::kss::submit_quiz),
        )
        .route(
            "/api/kss/assignments",
            get(h::kss::list_assignments).post(h::kss::create_assignment),
        )
        .route(
            "/api/kss/assignments/{id}",
            put(h::kss::update_assignment).delete(h::kss::delete_assignment),
        )
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/inventory/suppliers",
            get(h::inventory::list_suppliers).post(h::inventory::create_supplier),
        )
        .route(
            "/api/inventory/suppliers/{id}",
            get(h::inventory::get_supplier)
                .put(h::inventory::update_supplier)
                .delete(h::inventory::delete_supplier),
        )
        .route(
            "/api/inventory/components",
            get(h::inventory::list_components).post(h::inventory::create_component),
        )
        .route(
            "/api/inventory/components/{id}",
            get(h::inventory::get_component)
                .put(h::inventory::update_component)
                .delete(h::inventory::delete_component),
        )
        .route(
            "/api/inventory/products",
            get(h::inventory::list_products).post(h::inventory::create_product),
        )
        .route(
            "/api/inventory/products/{id}",
            get(h::inventory::get_product)
                .put(h::inventory::update_product)
                .delete(h::inventory::delete_product),
        )
        .route(
            "/api/inventory/products/{id}/components",
            get(h::inventory::list_product_components)
                .put(h::inventory::replace_product_components),
        )
        .route(
            "/api/inventory/batches",
            get(h::inventory::list_batches).post(h::inventory::create_batch),
        )
        .route(
            "/api/inventory/batches/{id}",
            get(h::inventory::get_batch)
                .put(h::inventory::update_batch)
                .delete(h::inventory::delete_batch),
        )
        .route(
            "/api/inventory/batches/{id}/status",
            put(h::inventory::update_batch_status),
        )
}

fn sales_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/sales/customers",
            get(h::sales::list_customers).post(h::sales::create_customer),
        )
        .route(
            "/api/sales/customers/{id}",
            get(h::sales::get_customer)
                .put(h::sales::update_customer)
                .delete(h::sales::delete_customer),
        )
        .route(
            "/api/sales/orders",
            get(h::sales::list_orders).post(h::sales::create_order),
        )
        .route(
            "/api/sales/orders/{id}",
            get(h::sales::get_order)
                .put(h::sales::update_order)
                .delete(h::sales::delete_order),
        )
        .route(
            "/api/sales/orders/{id}/status",
            put(h::sales::update_order_status),
        )
}

/// Full application router with shared layers and state.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .route("/api/health", get(h::health::health))
        .merge(hr_routes())
        .merge(kss_routes())
        .merge(inventory_routes())
        .merge(sales_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(middleware::log_error_responses))
        .layer(axum_middleware::from_fn(middleware::request_id))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
