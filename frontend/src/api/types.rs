use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ============================================================================
// Envelope & errors
// ============================================================================

/// Body shape shared by every backend response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn parse_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "PARSE_FAILED".to_string(),
            details: None,
        }
    }

    /// Field messages carried by a `VALIDATION_ERROR` envelope.
    pub fn validation_messages(&self) -> Vec<String> {
        self.details
            .as_ref()
            .and_then(|details| details.get("errors"))
            .and_then(|errors| errors.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|err| err.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// HR
// ============================================================================

pub const EMPLOYEE_ROLES: [&str; 3] = ["staff", "manager", "admin"];
pub const EMPLOYEE_STATUSES: [&str; 2] = ["active", "inactive"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub role: String,
    pub status: String,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub signature_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub role: String,
    pub status: String,
    pub hire_date: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub signature_url: Option<String>,
}

impl From<&Employee> for EmployeePayload {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_code: employee.employee_code.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            role: employee.role.clone(),
            status: employee.status.clone(),
            hire_date: employee.hire_date,
            avatar_url: employee.avatar_url.clone(),
            signature_url: employee.signature_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

/// Attendance status as stored: one tag or an ordered list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusField {
    One(String),
    Many(Vec<String>),
}

impl Default for StatusField {
    fn default() -> Self {
        StatusField::Many(Vec::new())
    }
}

impl StatusField {
    /// First tag of the record, `None` for an empty string or list.
    pub fn primary(&self) -> Option<&str> {
        let first = match self {
            StatusField::One(tag) => Some(tag.as_str()),
            StatusField::Many(tags) => tags.first().map(String::as_str),
        }?;
        let trimmed = first.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        match self {
            StatusField::One(tag) => vec![tag.as_str()],
            StatusField::Many(tags) => tags.iter().map(String::as_str).collect(),
        }
        .into_iter()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    #[serde(default)]
    pub status: StatusField,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePayload {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: StatusField,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub employee_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// ============================================================================
// KSS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KssModule {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KssModulePayload {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_published: bool,
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KssLesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub position: i32,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KssLessonPayload {
    pub title: String,
    pub content: Option<String>,
    pub position: i32,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KssQuestion {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KssQuestionPayload {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: i32,
}

pub const ASSIGNMENT_STATUSES: [&str; 3] = ["assigned", "in-progress", "completed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KssAssignment {
    pub id: Uuid,
    pub module_id: Uuid,
    pub employee_id: Uuid,
    pub status: String,
    #[serde(default)]
    pub completed_lesson_ids: Vec<Uuid>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssignmentPayload {
    pub module_id: Uuid,
    pub employee_id: Uuid,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAssignmentPayload {
    pub status: String,
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_lesson_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentQuery {
    pub employee_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: Uuid,
    pub selected_option: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitQuizPayload {
    pub assignment_id: Uuid,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub lesson_id: Uuid,
    pub correct: usize,
    pub total: usize,
    pub score: f64,
    pub passed: bool,
    pub assignment: KssAssignment,
}

// ============================================================================
// Inventory
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub unit_cost: f64,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPayload {
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub unit_cost: f64,
    pub supplier_id: Option<Uuid>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub product_id: Uuid,
    pub component_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLinePayload {
    pub component_id: Uuid,
    pub quantity: i32,
}

pub const BATCH_STATUSES: [&str; 3] = ["in-transit", "processing", "completed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    pub batch_code: String,
    pub supplier_id: Uuid,
    pub status: String,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub received_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub component_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDetail {
    #[serde(flatten)]
    pub batch: Batch,
    #[serde(default)]
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchPayload {
    pub batch_code: String,
    pub supplier_id: Option<Uuid>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub items: Vec<BatchItem>,
}

// ============================================================================
// Sales
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
}

pub const ORDER_STATUSES: [&str; 5] = ["pending", "confirmed", "shipped", "delivered", "cancelled"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub order_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer_id: Uuid,
    pub order_date: NaiveDate,
    pub discount_percent: f64,
    pub tax_percent: f64,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub customer_id: Option<Uuid>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_helpers_set_expected_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());

        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("x").code, "REQUEST_FAILED");
        assert_eq!(ApiError::parse_failed("x").code, "PARSE_FAILED");
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn validation_messages_read_details_errors() {
        let error = ApiError {
            error: "Validation failed: email: email".into(),
            code: "VALIDATION_ERROR".into(),
            details: Some(json!({ "errors": ["email: email", "full_name: length"] })),
        };
        assert_eq!(
            error.validation_messages(),
            vec!["email: email".to_string(), "full_name: length".to_string()]
        );
        assert!(ApiError::unknown("x").validation_messages().is_empty());
    }

    #[test]
    fn status_field_accepts_string_or_array() {
        let one: StatusField = serde_json::from_value(json!("late")).unwrap();
        assert_eq!(one.primary(), Some("late"));

        let many: StatusField = serde_json::from_value(json!(["absent", "leave"])).unwrap();
        assert_eq!(many.primary(), Some("absent"));
        assert_eq!(many.tags(), vec!["absent", "leave"]);
    }

    #[test]
    fn status_field_without_tags_has_no_primary() {
        assert_eq!(StatusField::One("  ".into()).primary(), None);
        assert_eq!(StatusField::Many(Vec::new()).primary(), None);
        assert!(StatusField::default().tags().is_empty());
    }

    #[test]
    fn attendance_record_defaults_missing_status() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "id": "6f1c1f4e-2f7b-4a43-9c55-1f2a3b4c5d6e",
            "employee_id": "0b7d2c43-8c0a-4a5e-9f5e-8d9c1b2a3f4e",
            "date": "2025-03-04",
            "created_at": "2025-03-04T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.status, StatusField::default());
        assert!(record.check_in.is_none());
    }

    #[test]
    fn batch_detail_flattens_batch_fields() {
        let detail: BatchDetail = serde_json::from_value(json!({
            "id": "6f1c1f4e-2f7b-4a43-9c55-1f2a3b4c5d6e",
            "batch_code": "B-001",
            "supplier_id": "0b7d2c43-8c0a-4a5e-9f5e-8d9c1b2a3f4e",
            "status": "in-transit",
            "created_at": "2025-03-04T09:00:00Z",
            "updated_at": "2025-03-04T09:00:00Z",
            "items": [{ "component_id": "0b7d2c43-8c0a-4a5e-9f5e-8d9c1b2a3f4e", "quantity": 4 }]
        }))
        .unwrap();
        assert_eq!(detail.batch.batch_code, "B-001");
        assert_eq!(detail.items.len(), 1);
    }
}
