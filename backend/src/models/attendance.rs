//! Attendance transactions recorded per employee and day.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::types::{AttendanceId, EmployeeId};

use super::normalize_optional;

/// Status tags accepted on attendance records.
pub const KNOWN_STATUSES: [&str; 6] = [
    "in-time",
    "present",
    "late",
    "early-departure",
    "absent",
    "leave",
];

/// Lower-cases and trims a status tag, mapping `_` and spaces to `-`.
pub fn normalize_status_tag(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub check_in: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub check_out: Option<NaiveTime>,
    /// Ordered status tags; the first one is the primary status.
    pub status: Vec<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status as sent by clients: either one tag or a list of tags.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StatusInput {
    One(String),
    Many(Vec<String>),
}

impl StatusInput {
    pub fn into_tags(self) -> Vec<String> {
        let raw = match self {
            StatusInput::One(tag) => vec![tag],
            StatusInput::Many(tags) => tags,
        };
        let mut tags: Vec<String> = Vec::with_capacity(raw.len());
        for tag in raw.iter().map(|t| normalize_status_tag(t)) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

fn validate_status_input(status: &StatusInput) -> Result<(), ValidationError> {
    let tags = status.clone().into_tags();
    if tags.is_empty() {
        return Err(ValidationError::new("status_required"));
    }
    if tags
        .iter()
        .any(|tag| !KNOWN_STATUSES.contains(&tag.as_str()))
    {
        return Err(ValidationError::new("status_unknown"));
    }
    Ok(())
}

fn validate_times(payload: &AttendancePayload) -> Result<(), ValidationError> {
    if let (Some(check_in), Some(check_out)) = (payload.check_in, payload.check_out) {
        if check_out < check_in {
            return Err(ValidationError::new("check_out_before_check_in"));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_times"))]
pub struct AttendancePayload {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub check_in: Option<NaiveTime>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub check_out: Option<NaiveTime>,
    #[validate(custom(function = "validate_status_input"))]
    pub status: StatusInput,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub note: Option<String>,
}

impl AttendanceRecord {
    pub fn from_payload(payload: AttendancePayload) -> Self {
        let now = Utc::now();
        Self {
            id: AttendanceId::new(),
            employee_id: payload.employee_id,
            date: payload.date,
            check_in: payload.check_in,
            check_out: payload.check_out,
            status: payload.status.into_tags(),
            note: normalize_optional(payload.note),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, payload: AttendancePayload) {
        self.employee_id = payload.employee_id;
        self.date = payload.date;
        self.check_in = payload.check_in;
        self.check_out = payload.check_out;
        self.status = payload.status.into_tags();
        self.note = normalize_optional(payload.note);
        self.updated_at = Utc::now();
    }

    pub fn primary_status(&self) -> Option<&str> {
        self.status.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(status: serde_json::Value) -> AttendancePayload {
        serde_json::from_value(serde_json::json!({
            "employee_id": "6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10",
            "date": "2025-03-03",
            "check_in": "09:00:00",
            "check_out": "18:00:00",
            "status": status
        }))
        .expect("payload")
    }

    #[test]
    fn single_status_string_becomes_one_tag() {
        let record = AttendanceRecord::from_payload(payload(serde_json::json!("In_Time")));
        assert_eq!(record.status, vec!["in-time"]);
        assert_eq!(record.primary_status(), Some("in-time"));
    }

    #[test]
    fn status_array_keeps_order_and_drops_duplicates() {
        let tags = StatusInput::Many(vec![
            "late".into(),
            "Early Departure".into(),
            "LATE".into(),
            " ".into(),
        ])
        .into_tags();
        assert_eq!(tags, vec!["late", "early-departure"]);
    }

    #[test]
    fn unknown_or_empty_status_is_rejected() {
        assert!(payload(serde_json::json!("sleeping")).validate().is_err());
        assert!(payload(serde_json::json!([])).validate().is_err());
        assert!(payload(serde_json::json!(["present"])).validate().is_ok());
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let mut p = payload(serde_json::json!("present"));
        p.check_in = NaiveTime::from_hms_opt(18, 0, 0);
        p.check_out = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(p.validate().is_err());
    }
}
