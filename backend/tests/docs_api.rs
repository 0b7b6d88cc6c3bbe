use axum::http::StatusCode;
use backoffice_backend::docs;
use utoipa::OpenApi;

mod support;

use support::{body_json, get, send, test_app};

#[test]
fn openapi_lists_every_resource_area() {
    let json = serde_json::to_value(docs::ApiDoc::openapi()).expect("serialize openapi");
    let paths = json["paths"].as_object().expect("paths object");
    for path in [
        "/api/health",
        "/api/employees",
        "/api/attendance/export",
        "/api/kss/lessons/{id}/submit",
        "/api/inventory/products/{id}/components",
        "/api/inventory/batches/{id}/status",
        "/api/sales/orders/{id}/status",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(json["components"]["schemas"]["OrderDetail"].is_object());
}

#[tokio::test]
async fn openapi_json_is_served() {
    let response = send(test_app(), get("/api/docs/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["info"]["title"], "Back-office API");
}
