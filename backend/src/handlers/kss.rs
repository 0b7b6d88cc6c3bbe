use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    handlers::common::{parse_optional_id, ApiResponse, ApiResult, AppJson, AppPath, AppQuery},
    models::kss::{
        CreateAssignmentPayload, KssAssignment, KssLesson, KssLessonPayload, KssModule,
        KssModulePayload, KssQuestion, KssQuestionPayload, QuizResult, SubmitQuizPayload,
        UpdateAssignmentPayload,
    },
    repositories::{
        AssignmentFilters, EmployeeRepository, KssAssignmentRepository, KssLessonRepository,
        KssModuleRepository, KssQuestionRepository, Repository,
    },
    services::QuizService,
    state::AppState,
    types::{KssAssignmentId, KssLessonId, KssModuleId, KssQuestionId},
    validation::validate_payload,
};

// ============================================================================
// Modules
// ============================================================================

pub async fn list_modules(State(state): State<AppState>) -> ApiResult<Vec<KssModule>> {
    let modules = KssModuleRepository::new().find_all(&state.pool).await?;
    Ok(ApiResponse::ok(modules))
}

pub async fn get_module(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssModuleId>,
) -> ApiResult<KssModule> {
    let module = KssModuleRepository::new().find_by_id(&state.pool, id).await?;
    Ok(ApiResponse::ok(module))
}

pub async fn create_module(
    State(state): State<AppState>,
    AppJson(payload): AppJson<KssModulePayload>,
) -> ApiResult<KssModule> {
    validate_payload(&payload)?;
    let module = KssModule::from_payload(payload);
    let saved = KssModuleRepository::new().create(&state.pool, &module).await?;
    Ok(ApiResponse::created(saved).with_message("Module created"))
}

pub async fn update_module(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssModuleId>,
    AppJson(payload): AppJson<KssModulePayload>,
) -> ApiResult<KssModule> {
    validate_payload(&payload)?;
    let repo = KssModuleRepository::new();
    let mut module = repo.find_by_id(&state.pool, id).await?;
    module.apply(payload);
    let saved = repo.update(&state.pool, &module).await?;
    Ok(ApiResponse::ok(saved).with_message("Module updated"))
}

/// Lessons, questions and assignments cascade with the module.
pub async fn delete_module(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssModuleId>,
) -> ApiResult<Option<()>> {
    KssModuleRepository::new().delete(&state.pool, id).await?;
    tracing::info!(module_id = %id, "Module deleted");
    Ok(ApiResponse::message_only("Module deleted"))
}

// ============================================================================
// Lessons
// ============================================================================

pub async fn list_lessons(
    State(state): State<AppState>,
    AppPath(module_id): AppPath<KssModuleId>,
) -> ApiResult<Vec<KssLesson>> {
    KssModuleRepository::new()
        .find_by_id(&state.pool, module_id)
        .await?;
    let lessons = KssLessonRepository::new()
        .list_by_module(&state.pool, module_id)
        .await?;
    Ok(ApiResponse::ok(lessons))
}

pub async fn create_lesson(
    State(state): State<AppState>,
    AppPath(module_id): AppPath<KssModuleId>,
    AppJson(payload): AppJson<KssLessonPayload>,
) -> ApiResult<KssLesson> {
    validate_payload(&payload)?;
    KssModuleRepository::new()
        .find_by_id(&state.pool, module_id)
        .await?;
    let lesson = KssLesson::from_payload(module_id, payload);
    let saved = KssLessonRepository::new().create(&state.pool, &lesson).await?;
    Ok(ApiResponse::created(saved).with_message("Lesson created"))
}

pub async fn update_lesson(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssLessonId>,
    AppJson(payload): AppJson<KssLessonPayload>,
) -> ApiResult<KssLesson> {
    validate_payload(&payload)?;
    let repo = KssLessonRepository::new();
    let mut lesson = repo.find_by_id(&state.pool, id).await?;
    lesson.apply(payload);
    let saved = repo.update(&state.pool, &lesson).await?;
    Ok(ApiResponse::ok(saved).with_message("Lesson updated"))
}

pub async fn delete_lesson(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssLessonId>,
) -> ApiResult<Option<()>> {
    KssLessonRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Lesson deleted"))
}

// ============================================================================
// Questions and quiz
// ============================================================================

pub async fn list_questions(
    State(state): State<AppState>,
    AppPath(lesson_id): AppPath<KssLessonId>,
) -> ApiResult<Vec<KssQuestion>> {
    KssLessonRepository::new()
        .find_by_id(&state.pool, lesson_id)
        .await?;
    let questions = KssQuestionRepository::new()
        .list_by_lesson(&state.pool, lesson_id)
        .await?;
    Ok(ApiResponse::ok(questions))
}

pub async fn create_question(
    State(state): State<AppState>,
    AppPath(lesson_id): AppPath<KssLessonId>,
    AppJson(payload): AppJson<KssQuestionPayload>,
) -> ApiResult<KssQuestion> {
    validate_payload(&payload)?;
    KssLessonRepository::new()
        .find_by_id(&state.pool, lesson_id)
        .await?;
    let question = KssQuestion::from_payload(lesson_id, payload);
    let saved = KssQuestionRepository::new()
        .create(&state.pool, &question)
        .await?;
    Ok(ApiResponse::created(saved).with_message("Question created"))
}

pub async fn delete_question(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssQuestionId>,
) -> ApiResult<Option<()>> {
    KssQuestionRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Question deleted"))
}

pub async fn submit_quiz(
    State(state): State<AppState>,
    AppPath(lesson_id): AppPath<KssLessonId>,
    AppJson(payload): AppJson<SubmitQuizPayload>,
) -> ApiResult<QuizResult> {
    let service = QuizService::new(state.pool.clone(), state.config.kss_pass_threshold);
    let result = service
        .submit(lesson_id, payload.assignment_id, &payload.answers)
        .await?;
    let message = if result.passed {
        "Lesson passed"
    } else {
        "Score below the pass threshold"
    };
    Ok(ApiResponse::ok(result).with_message(message))
}

// ============================================================================
// Assignments
// ============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AssignmentListQuery {
    pub employee_id: Option<String>,
    pub module_id: Option<String>,
}

pub async fn list_assignments(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AssignmentListQuery>,
) -> ApiResult<Vec<KssAssignment>> {
    let filters = AssignmentFilters {
        employee_id: parse_optional_id(query.employee_id.as_deref(), "employee_id")?,
        module_id: parse_optional_id(query.module_id.as_deref(), "module_id")?,
    };
    let assignments = KssAssignmentRepository::new()
        .list(&state.pool, &filters)
        .await?;
    Ok(ApiResponse::ok(assignments))
}

/// One assignment per (module, employee); duplicates are `409`.
pub async fn create_assignment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAssignmentPayload>,
) -> ApiResult<KssAssignment> {
    validate_payload(&payload)?;
    KssModuleRepository::new()
        .find_by_id(&state.pool, payload.module_id)
        .await?;
    EmployeeRepository::new()
        .find_by_id(&state.pool, payload.employee_id)
        .await?;
    let assignment = KssAssignment::new(payload);
    let saved = KssAssignmentRepository::new()
        .create(&state.pool, &assignment)
        .await?;
    Ok(ApiResponse::created(saved).with_message("Module assigned"))
}

pub async fn update_assignment(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssAssignmentId>,
    AppJson(payload): AppJson<UpdateAssignmentPayload>,
) -> ApiResult<KssAssignment> {
    validate_payload(&payload)?;
    let repo = KssAssignmentRepository::new();
    let mut assignment = repo.find_by_id(&state.pool, id).await?;
    assignment.apply(payload, Utc::now());
    let saved = repo.update(&state.pool, &assignment).await?;
    Ok(ApiResponse::ok(saved).with_message("Assignment updated"))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    AppPath(id): AppPath<KssAssignmentId>,
) -> ApiResult<Option<()>> {
    KssAssignmentRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Assignment deleted"))
}
