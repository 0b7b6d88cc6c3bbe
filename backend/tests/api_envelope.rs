use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

mod support;

use support::{body_json, get, json_request, send, test_app};

#[tokio::test]
async fn health_returns_success_envelope() {
    let response = send(test_app(), get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["service"], "backoffice-backend");
    assert_eq!(json["data"]["time_zone"], "Asia/Tokyo");
}

#[tokio::test]
async fn malformed_path_id_returns_error_envelope() {
    let response = send(test_app(), get("/api/employees/not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert!(json["data"].is_null());
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn invalid_json_body_returns_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/employees")
        .header("content-type", "application/json")
        .body(Body::from("not valid json"))
        .unwrap();
    let response = send(test_app(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn employee_validation_failure_lists_fields() {
    let payload = json!({
        "employee_code": "E 01",
        "full_name": "  ",
        "email": "not-an-email",
        "department": "Ops"
    });
    let response = send(test_app(), json_request("POST", "/api/employees", &payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let errors = json["details"]["errors"].as_array().expect("errors");
    let joined: Vec<&str> = errors.iter().filter_map(|e| e.as_str()).collect();
    assert!(joined.iter().any(|e| e.starts_with("email:")));
    assert!(joined.iter().any(|e| e.starts_with("employee_code:")));
    assert!(joined.iter().any(|e| e.starts_with("full_name:")));
}

#[tokio::test]
async fn attendance_rejects_unknown_status_tag() {
    let payload = json!({
        "employee_id": "6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10",
        "date": "2024-05-02",
        "status": ["present", "sleeping"]
    });
    let response = send(test_app(), json_request("POST", "/api/attendance", &payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed: status: status_unknown");
}

#[tokio::test]
async fn attendance_list_rejects_bad_dates() {
    let response = send(test_app(), get("/api/attendance?from=yesterday")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "`from` must be a valid date (YYYY-MM-DD)");
}

#[tokio::test]
async fn batch_list_rejects_unknown_status_filter() {
    let response = send(test_app(), get("/api/inventory/batches?status=lost")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_without_items_is_rejected() {
    let payload = json!({
        "customer_id": "6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10",
        "order_date": "2024-05-02",
        "items": []
    });
    let response = send(test_app(), json_request("POST", "/api/sales/orders", &payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed: items_required");
}

#[tokio::test]
async fn bom_with_zero_quantity_is_rejected() {
    let payload = json!({
        "components": [
            { "component_id": "6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10", "quantity": 0 }
        ]
    });
    let response = send(
        test_app(),
        json_request(
            "PUT",
            "/api/inventory/products/6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a11/components",
            &payload,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["message"].as_str().expect("message");
    assert!(message.starts_with("Validation failed: components"));
    assert!(message.ends_with("quantity: range"));
}

#[tokio::test]
async fn question_needs_two_options() {
    let payload = json!({ "prompt": "Pick one", "options": ["only"], "correct_option": 0 });
    let response = send(
        test_app(),
        json_request(
            "POST",
            "/api/kss/lessons/6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10/questions",
            &payload,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = send(test_app(), get("/api/nothing-here")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
