#![cfg(not(coverage))]

use super::test_support::mock::*;
use super::*;
use serde_json::json;
use uuid::Uuid;

const EMPLOYEE_ID: &str = "0b7d2c43-8c0a-4a5e-9f5e-8d9c1b2a3f4e";
const RECORD_ID: &str = "6f1c1f4e-2f7b-4a43-9c55-1f2a3b4c5d6e";

fn employee_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "employee_code": "EMP-001",
        "full_name": "Alice Example",
        "email": "alice@example.com",
        "phone": null,
        "department": "Engineering",
        "position": "Developer",
        "role": "staff",
        "status": "active",
        "hire_date": "2024-04-01",
        "avatar_url": null,
        "signature_url": null,
        "created_at": "2024-04-01T00:00:00Z",
        "updated_at": "2024-04-01T00:00:00Z"
    })
}

fn attendance_json(status: serde_json::Value) -> serde_json::Value {
    json!({
        "id": RECORD_ID,
        "employee_id": EMPLOYEE_ID,
        "date": "2025-03-04",
        "check_in": "09:00:00",
        "check_out": "18:00:00",
        "status": status,
        "note": null,
        "created_at": "2025-03-04T09:00:00Z",
        "updated_at": "2025-03-04T09:00:00Z"
    })
}

fn order_json() -> serde_json::Value {
    json!({
        "id": RECORD_ID,
        "order_number": "SO-20250304-6F1C1F",
        "customer_id": EMPLOYEE_ID,
        "order_date": "2025-03-04",
        "status": "pending",
        "discount_percent": 10.0,
        "tax_percent": 8.0,
        "notes": null,
        "items": [{ "order_id": RECORD_ID, "product_id": EMPLOYEE_ID, "quantity": 2, "unit_price": 50.0 }],
        "totals": { "subtotal": 100.0, "discount": 10.0, "tax": 7.2, "total": 97.2 },
        "created_at": "2025-03-04T09:00:00Z",
        "updated_at": "2025-03-04T09:00:00Z"
    })
}

#[tokio::test]
async fn get_employees_decodes_envelope_and_sends_filters() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/employees");
        then.status(200)
            .json_body(ok(json!([employee_json(EMPLOYEE_ID)])));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let employees = client
        .get_employees(&EmployeeQuery {
            search: Some("alice".into()),
            department: None,
            status: Some("active".into()),
        })
        .await
        .unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].full_name, "Alice Example");
    let received = server.received();
    assert_eq!(received[0].query.as_deref(), Some("search=alice&status=active"));
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/employees");
        then.status(409)
            .json_body(failure("CONFLICT", "Employee code or email already exists"));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let err = client
        .create_employee(&EmployeePayload::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, "CONFLICT");
    assert_eq!(err.to_string(), "Employee code or email already exists");
}

#[tokio::test]
async fn attendance_accepts_string_and_array_statuses() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/attendance");
        then.status(200).json_body(ok(json!([
            attendance_json(json!("late")),
            attendance_json(json!(["in-time", "early-departure"])),
        ])));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let records = client
        .get_attendance(&AttendanceQuery::default())
        .await
        .unwrap();

    assert_eq!(records[0].status.primary(), Some("late"));
    assert_eq!(records[1].status.primary(), Some("in-time"));
}

#[tokio::test]
async fn delete_accepts_null_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE)
            .path(&format!("/api/employees/{}", EMPLOYEE_ID));
        then.status(200).json_body(json!({
            "status": "success",
            "data": null,
            "message": "Employee deleted"
        }));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let id = Uuid::parse_str(EMPLOYEE_ID).unwrap();
    assert!(client.delete_employee(id).await.is_ok());
}

#[tokio::test]
async fn order_list_ignores_server_totals_and_keeps_items() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/sales/orders");
        then.status(200).json_body(ok(json!([order_json()])));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let orders = client.get_orders(&OrderQuery::default()).await.unwrap();

    assert_eq!(orders[0].order_number, "SO-20250304-6F1C1F");
    assert_eq!(orders[0].items.len(), 1);
    assert_eq!(orders[0].items[0].quantity, 2);
}

#[tokio::test]
async fn status_updates_send_the_requested_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT)
            .path(&format!("/api/sales/orders/{}/status", RECORD_ID));
        then.status(400).json_body(failure(
            "BAD_REQUEST",
            "Order status cannot change from pending to shipped",
        ));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let id = Uuid::parse_str(RECORD_ID).unwrap();
    let err = client.update_order_status(id, "shipped").await.unwrap_err();

    assert_eq!(err.code, "BAD_REQUEST");
    let received = server.received();
    assert_eq!(received[0].body, Some(json!({ "status": "shipped" })));
}

#[tokio::test]
async fn replace_bom_wraps_lines_in_components() {
    let product_id = Uuid::parse_str(RECORD_ID).unwrap();
    let component_id = Uuid::parse_str(EMPLOYEE_ID).unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT)
            .path(&format!("/api/inventory/products/{}/components", RECORD_ID));
        then.status(200).json_body(ok(json!([{
            "product_id": RECORD_ID,
            "component_id": EMPLOYEE_ID,
            "quantity": 3
        }])));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let lines = client
        .replace_product_components(
            product_id,
            &[BomLinePayload {
                component_id,
                quantity: 3,
            }],
        )
        .await
        .unwrap();

    assert_eq!(lines[0].quantity, 3);
    assert_eq!(
        server.received()[0].body,
        Some(json!({ "components": [{ "component_id": EMPLOYEE_ID, "quantity": 3 }] }))
    );
}

#[tokio::test]
async fn validation_errors_keep_details() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/sales/customers");
        then.status(400).json_body(json!({
            "status": "error",
            "data": null,
            "message": "Validation failed: name: not_blank",
            "code": "VALIDATION_ERROR",
            "details": { "errors": ["name: not_blank"] }
        }));
    });
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let err = client
        .create_customer(&CustomerPayload::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(err.validation_messages(), vec!["name: not_blank".to_string()]);
}

#[tokio::test]
async fn unmatched_route_is_reported_as_error() {
    let server = MockServer::start();
    let client = ApiClient::new_with_base_url(server.url("/api"));

    let err = client.get_suppliers().await.unwrap_err();
    assert!(err.error.contains("/api/inventory/suppliers"));
}
