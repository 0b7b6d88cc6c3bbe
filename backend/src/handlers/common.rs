//! Response envelope, extractors and query helpers shared by all handlers.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::AppError;

/// Success envelope: `{ "status": "success", "data": ..., "message": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    http_status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "success",
            data,
            message: None,
            http_status: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            http_status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<Option<()>> {
    /// Envelope with `data: null`, used by deletes.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::ok(None).with_message(message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.http_status;
        (status, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// `Json` whose rejections render as the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` whose rejections render as the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `Path` whose rejections render as the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Blank values count as absent.
pub fn parse_optional_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse_date_value(value).map(Some).ok_or_else(|| {
            AppError::BadRequest(format!("`{}` must be a valid date (YYYY-MM-DD)", field))
        }),
        None => Ok(None),
    }
}

/// Parses an optional id query parameter; blank values count as absent.
pub fn parse_optional_id<T: std::str::FromStr>(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<T>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("`{}` must be a valid id", field))),
        None => Ok(None),
    }
}

/// Parses an optional kebab/snake-case enum query parameter via serde.
pub fn parse_optional_enum<T: serde::de::DeserializeOwned>(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<T>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Unknown `{}` value: {}", field, value))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::BatchStatus;
    use crate::types::EmployeeId;

    #[test]
    fn parse_date_value_supports_rfc3339_sql_and_plain_date() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 4).unwrap();
        assert_eq!(parse_date_value("2026-02-04T09:10:11+09:00"), Some(expected));
        assert_eq!(parse_date_value("2026-02-04 09:10:11"), Some(expected));
        assert_eq!(parse_date_value("2026-02-04"), Some(expected));
        assert!(parse_date_value("2026-13-01").is_none());
    }

    #[test]
    fn optional_parsers_treat_blank_as_absent() {
        assert_eq!(parse_optional_date(Some("  "), "from").unwrap(), None);
        assert!(parse_optional_date(Some("nope"), "from").is_err());
        assert_eq!(
            parse_optional_id::<EmployeeId>(Some(""), "employee_id").unwrap(),
            None
        );
        assert!(parse_optional_id::<EmployeeId>(Some("x"), "employee_id").is_err());
    }

    #[test]
    fn parse_optional_enum_uses_wire_names() {
        assert_eq!(
            parse_optional_enum::<BatchStatus>(Some("in-transit"), "status").unwrap(),
            Some(BatchStatus::InTransit)
        );
        assert!(parse_optional_enum::<BatchStatus>(Some("lost"), "status").is_err());
    }

    #[tokio::test]
    async fn created_envelope_sets_status_code() {
        let response = ApiResponse::created(serde_json::json!({"id": 1}))
            .with_message("Created")
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["message"], "Created");
    }

    #[tokio::test]
    async fn message_only_envelope_has_null_data() {
        let response = ApiResponse::message_only("Deleted").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "Deleted");
    }
}
