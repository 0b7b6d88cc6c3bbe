//! Knowledge Sharing System: training modules, lessons, quiz questions and
//! the assignments that track an employee's progress through a module.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::types::{EmployeeId, KssAssignmentId, KssLessonId, KssModuleId, KssQuestionId};
use crate::validation::rules::{validate_not_blank, validate_url_like};

use super::normalize_optional;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct KssModule {
    pub id: KssModuleId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_published: bool,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct KssModulePayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = 80))]
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[validate(custom(function = "validate_url_like"))]
    #[serde(default)]
    pub document_url: Option<String>,
}

impl KssModule {
    pub fn from_payload(payload: KssModulePayload) -> Self {
        let now = Utc::now();
        Self {
            id: KssModuleId::new(),
            title: payload.title.trim().to_string(),
            description: normalize_optional(payload.description),
            category: normalize_optional(payload.category),
            is_published: payload.is_published,
            document_url: normalize_optional(payload.document_url),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, payload: KssModulePayload) {
        self.title = payload.title.trim().to_string();
        self.description = normalize_optional(payload.description);
        self.category = normalize_optional(payload.category);
        self.is_published = payload.is_published;
        self.document_url = normalize_optional(payload.document_url);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct KssLesson {
    pub id: KssLessonId,
    pub module_id: KssModuleId,
    pub title: String,
    pub content: Option<String>,
    pub position: i32,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct KssLessonPayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub position: i32,
    #[validate(range(min = 0, max = 1440))]
    #[serde(default)]
    pub duration_minutes: i32,
}

impl KssLesson {
    pub fn from_payload(module_id: KssModuleId, payload: KssLessonPayload) -> Self {
        Self {
            id: KssLessonId::new(),
            module_id,
            title: payload.title.trim().to_string(),
            content: normalize_optional(payload.content),
            position: payload.position,
            duration_minutes: payload.duration_minutes,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, payload: KssLessonPayload) {
        self.title = payload.title.trim().to_string();
        self.content = normalize_optional(payload.content);
        self.position = payload.position;
        self.duration_minutes = payload.duration_minutes;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct KssQuestion {
    pub id: KssQuestionId,
    pub lesson_id: KssLessonId,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_option: i32,
    pub created_at: DateTime<Utc>,
}

fn validate_question(payload: &KssQuestionPayload) -> Result<(), ValidationError> {
    let options: Vec<&String> = payload
        .options
        .iter()
        .filter(|o| !o.trim().is_empty())
        .collect();
    if options.len() < 2 || options.len() != payload.options.len() {
        return Err(ValidationError::new("options_invalid"));
    }
    if payload.correct_option < 0 || payload.correct_option as usize >= options.len() {
        return Err(ValidationError::new("correct_option_out_of_range"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_question"))]
pub struct KssQuestionPayload {
    #[validate(length(min = 1, max = 1000), custom(function = "validate_not_blank"))]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: i32,
}

impl KssQuestion {
    pub fn from_payload(lesson_id: KssLessonId, payload: KssQuestionPayload) -> Self {
        Self {
            id: KssQuestionId::new(),
            lesson_id,
            prompt: payload.prompt.trim().to_string(),
            options: payload
                .options
                .into_iter()
                .map(|o| o.trim().to_string())
                .collect(),
            correct_option: payload.correct_option,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct KssAssignment {
    pub id: KssAssignmentId,
    pub module_id: KssModuleId,
    pub employee_id: EmployeeId,
    pub status: AssignmentStatus,
    pub completed_lesson_ids: Vec<Uuid>,
    pub score: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentPayload {
    pub module_id: KssModuleId,
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentPayload {
    pub status: AssignmentStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_lesson_ids: Option<Vec<Uuid>>,
}

impl KssAssignment {
    pub fn new(payload: CreateAssignmentPayload) -> Self {
        Self {
            id: KssAssignmentId::new(),
            module_id: payload.module_id,
            employee_id: payload.employee_id,
            status: AssignmentStatus::Assigned,
            completed_lesson_ids: Vec::new(),
            score: None,
            due_date: payload.due_date,
            assigned_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn apply(&mut self, payload: UpdateAssignmentPayload, now: DateTime<Utc>) {
        if let Some(mut ids) = payload.completed_lesson_ids {
            ids.sort();
            ids.dedup();
            self.completed_lesson_ids = ids;
        }
        self.due_date = payload.due_date;
        self.set_status(payload.status, now);
    }

    pub fn set_status(&mut self, status: AssignmentStatus, now: DateTime<Utc>) {
        self.status = status;
        self.completed_at = match status {
            AssignmentStatus::Completed => self.completed_at.or(Some(now)),
            _ => None,
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizAnswer {
    pub question_id: KssQuestionId,
    pub selected_option: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitQuizPayload {
    pub assignment_id: KssAssignmentId,
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizResult {
    pub lesson_id: KssLessonId,
    pub correct: usize,
    pub total: usize,
    pub score: f64,
    pub passed: bool,
    pub assignment: KssAssignment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: Vec<&str>, correct: i32) -> KssQuestionPayload {
        KssQuestionPayload {
            prompt: "What?".into(),
            options: options.into_iter().map(String::from).collect(),
            correct_option: correct,
        }
    }

    #[test]
    fn question_requires_two_options_and_valid_answer_index() {
        assert!(question(vec!["a"], 0).validate().is_err());
        assert!(question(vec!["a", "b"], 2).validate().is_err());
        assert!(question(vec!["a", " "], 0).validate().is_err());
        assert!(question(vec!["a", "b"], -1).validate().is_err());
        assert!(question(vec!["a", "b", "c"], 2).validate().is_ok());
    }

    #[test]
    fn assignment_status_serializes_kebab_case() {
        let json = serde_json::to_value(AssignmentStatus::InProgress).unwrap();
        assert_eq!(json, serde_json::json!("in-progress"));
    }

    #[test]
    fn set_status_tracks_completion_timestamp() {
        let mut assignment = KssAssignment::new(CreateAssignmentPayload {
            module_id: KssModuleId::new(),
            employee_id: EmployeeId::new(),
            due_date: None,
        });
        let now = Utc::now();
        assignment.set_status(AssignmentStatus::Completed, now);
        assert_eq!(assignment.completed_at, Some(now));

        assignment.set_status(AssignmentStatus::InProgress, now);
        assert!(assignment.completed_at.is_none());
    }
}
