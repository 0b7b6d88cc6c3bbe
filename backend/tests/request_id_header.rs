use axum::{body::Body, http::Request};
use uuid::Uuid;

mod support;

use support::{get, send, test_app};

#[tokio::test]
async fn request_id_is_generated_when_missing() {
    let response = send(test_app(), get("/api/health")).await;
    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap();
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn request_id_echoes_client_value() {
    let request = Request::builder()
        .uri("/api/health")
        .header("x-request-id", "client-req-123")
        .body(Body::empty())
        .unwrap();
    let response = send(test_app(), request).await;
    assert_eq!(response.headers()["x-request-id"], "client-req-123");
}

#[tokio::test]
async fn request_id_uses_correlation_id_and_survives_errors() {
    let request = Request::builder()
        .uri("/api/employees/bad-id")
        .header("x-correlation-id", "corr-456")
        .body(Body::empty())
        .unwrap();
    let response = send(test_app(), request).await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.headers()["x-request-id"], "corr-456");
}
