//! Employees managed by the HR pages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::EmployeeId;
use crate::validation::rules::{validate_code, validate_not_blank, validate_url_like};

use super::normalize_optional;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    #[default]
    Staff,
    Manager,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: EmployeeId,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    pub hire_date: Option<NaiveDate>,
    /// Public URL returned by the storage client.
    pub avatar_url: Option<String>,
    pub signature_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmployeePayload {
    #[validate(custom(function = "validate_code"))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 120), custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 40))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 80), custom(function = "validate_not_blank"))]
    pub department: String,
    #[validate(length(max = 80))]
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub role: EmployeeRole,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_url_like"))]
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[validate(custom(function = "validate_url_like"))]
    #[serde(default)]
    pub signature_url: Option<String>,
}

impl Employee {
    pub fn from_payload(payload: EmployeePayload) -> Self {
        let now = Utc::now();
        let mut employee = Self {
            id: EmployeeId::new(),
            employee_code: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone: None,
            department: String::new(),
            position: String::new(),
            role: EmployeeRole::default(),
            status: EmployeeStatus::default(),
            hire_date: None,
            avatar_url: None,
            signature_url: None,
            created_at: now,
            updated_at: now,
        };
        employee.apply(payload);
        employee
    }

    /// Overwrites every editable field with the payload's values.
    pub fn apply(&mut self, payload: EmployeePayload) {
        self.employee_code = payload.employee_code.trim().to_uppercase();
        self.full_name = payload.full_name.trim().to_string();
        self.email = payload.email.trim().to_lowercase();
        self.phone = normalize_optional(payload.phone);
        self.department = payload.department.trim().to_string();
        self.position = payload.position.trim().to_string();
        self.role = payload.role;
        self.status = payload.status;
        self.hire_date = payload.hire_date;
        self.avatar_url = normalize_optional(payload.avatar_url);
        self.signature_url = normalize_optional(payload.signature_url);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn payload() -> EmployeePayload {
        EmployeePayload {
            employee_code: " emp-001 ".into(),
            full_name: " Jane Doe ".into(),
            email: "Jane.Doe@Example.com".into(),
            phone: Some("  ".into()),
            department: "Sales".into(),
            position: "Rep".into(),
            role: EmployeeRole::Staff,
            status: EmployeeStatus::Active,
            hire_date: None,
            avatar_url: None,
            signature_url: None,
        }
    }

    #[test]
    fn from_payload_normalizes_fields() {
        let employee = Employee::from_payload(payload());
        assert_eq!(employee.employee_code, "EMP-001");
        assert_eq!(employee.full_name, "Jane Doe");
        assert_eq!(employee.email, "jane.doe@example.com");
        assert!(employee.phone.is_none());
    }

    #[test]
    fn payload_rejects_bad_email_and_blank_name() {
        let mut bad = payload();
        bad.email = "not-an-email".into();
        bad.full_name = "   ".into();
        let errors = bad.validate().expect_err("invalid payload");
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("full_name"));
    }

    #[test]
    fn role_defaults_when_missing() {
        let json = serde_json::json!({
            "employee_code": "E1",
            "full_name": "A",
            "email": "a@example.com",
            "department": "HR"
        });
        let payload: EmployeePayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.role, EmployeeRole::Staff);
        assert_eq!(payload.status, EmployeeStatus::Active);
        assert!(payload.validate().is_ok());
    }
}
