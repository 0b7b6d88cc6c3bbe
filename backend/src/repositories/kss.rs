//! KSS repositories: modules, lessons, questions and assignments.

use crate::error::AppError;
use crate::models::kss::{KssAssignment, KssLesson, KssModule, KssQuestion};
use crate::repositories::common::{ensure_affected, push_clause};
use crate::repositories::repository::Repository;
use crate::types::{EmployeeId, KssAssignmentId, KssLessonId, KssModuleId, KssQuestionId};
use sqlx::{PgPool, Postgres, QueryBuilder};

const MODULE_TABLE: &str = "kss_modules";
const MODULE_COLUMNS: &str =
    "id, title, description, category, is_published, document_url, created_at, updated_at";

const LESSON_TABLE: &str = "kss_lessons";
const LESSON_COLUMNS: &str =
    "id, module_id, title, content, position, duration_minutes, created_at";

const QUESTION_TABLE: &str = "kss_questions";
const QUESTION_COLUMNS: &str = "id, lesson_id, prompt, options, correct_option, created_at";

const ASSIGNMENT_TABLE: &str = "kss_assignments";
const ASSIGNMENT_COLUMNS: &str = "id, module_id, employee_id, status, completed_lesson_ids, \
     score, due_date, assigned_at, completed_at";

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct KssModuleRepository;

impl KssModuleRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Repository<KssModule> for KssModuleRepository {
    const TABLE: &'static str = MODULE_TABLE;
    type Id = KssModuleId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<KssModule>, AppError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY title ASC",
            MODULE_COLUMNS, MODULE_TABLE
        );
        let rows = sqlx::query_as::<_, KssModule>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: KssModuleId) -> Result<KssModule, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", MODULE_COLUMNS, MODULE_TABLE);
        sqlx::query_as::<_, KssModule>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &KssModule) -> Result<KssModule, AppError> {
        let query = format!(
            "INSERT INTO {} (id, title, description, category, is_published, document_url, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            MODULE_TABLE, MODULE_COLUMNS
        );
        let row = sqlx::query_as::<_, KssModule>(&query)
            .bind(item.id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.category)
            .bind(item.is_published)
            .bind(&item.document_url)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &KssModule) -> Result<KssModule, AppError> {
        let query = format!(
            "UPDATE {} SET title = $2, description = $3, category = $4, is_published = $5, \
             document_url = $6, updated_at = $7 WHERE id = $1 RETURNING {}",
            MODULE_TABLE, MODULE_COLUMNS
        );
        let row = sqlx::query_as::<_, KssModule>(&query)
            .bind(item.id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.category)
            .bind(item.is_published)
            .bind(&item.document_url)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: KssModuleId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", MODULE_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Module")
    }
}

// ============================================================================
// Lessons
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct KssLessonRepository;

impl KssLessonRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_by_module(
        &self,
        db: &PgPool,
        module_id: KssModuleId,
    ) -> Result<Vec<KssLesson>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE module_id = $1 ORDER BY position ASC, created_at ASC",
            LESSON_COLUMNS, LESSON_TABLE
        );
        let rows = sqlx::query_as::<_, KssLesson>(&query)
            .bind(module_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}

impl Repository<KssLesson> for KssLessonRepository {
    const TABLE: &'static str = LESSON_TABLE;
    type Id = KssLessonId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<KssLesson>, AppError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY module_id, position ASC",
            LESSON_COLUMNS, LESSON_TABLE
        );
        let rows = sqlx::query_as::<_, KssLesson>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: KssLessonId) -> Result<KssLesson, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", LESSON_COLUMNS, LESSON_TABLE);
        sqlx::query_as::<_, KssLesson>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Lesson not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &KssLesson) -> Result<KssLesson, AppError> {
        let query = format!(
            "INSERT INTO {} (id, module_id, title, content, position, duration_minutes, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            LESSON_TABLE, LESSON_COLUMNS
        );
        let row = sqlx::query_as::<_, KssLesson>(&query)
            .bind(item.id)
            .bind(item.module_id)
            .bind(&item.title)
            .bind(&item.content)
            .bind(item.position)
            .bind(item.duration_minutes)
            .bind(item.created_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &KssLesson) -> Result<KssLesson, AppError> {
        let query = format!(
            "UPDATE {} SET title = $2, content = $3, position = $4, duration_minutes = $5 \
             WHERE id = $1 RETURNING {}",
            LESSON_TABLE, LESSON_COLUMNS
        );
        let row = sqlx::query_as::<_, KssLesson>(&query)
            .bind(item.id)
            .bind(&item.title)
            .bind(&item.content)
            .bind(item.position)
            .bind(item.duration_minutes)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: KssLessonId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", LESSON_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Lesson")
    }
}

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct KssQuestionRepository;

impl KssQuestionRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_by_lesson(
        &self,
        db: &PgPool,
        lesson_id: KssLessonId,
    ) -> Result<Vec<KssQuestion>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE lesson_id = $1 ORDER BY created_at ASC",
            QUESTION_COLUMNS, QUESTION_TABLE
        );
        let rows = sqlx::query_as::<_, KssQuestion>(&query)
            .bind(lesson_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, db: &PgPool, item: &KssQuestion) -> Result<KssQuestion, AppError> {
        let query = format!(
            "INSERT INTO {} (id, lesson_id, prompt, options, correct_option, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            QUESTION_TABLE, QUESTION_COLUMNS
        );
        let row = sqlx::query_as::<_, KssQuestion>(&query)
            .bind(item.id)
            .bind(item.lesson_id)
            .bind(&item.prompt)
            .bind(&item.options)
            .bind(item.correct_option)
            .bind(item.created_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, db: &PgPool, id: KssQuestionId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", QUESTION_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Question")
    }
}

// ============================================================================
// Assignments
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct AssignmentFilters {
    pub employee_id: Option<EmployeeId>,
    pub module_id: Option<KssModuleId>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct KssAssignmentRepository;

impl KssAssignmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        db: &PgPool,
        filters: &AssignmentFilters,
    ) -> Result<Vec<KssAssignment>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            ASSIGNMENT_COLUMNS, ASSIGNMENT_TABLE
        ));
        let mut has_clause = false;
        if let Some(employee_id) = filters.employee_id {
            push_clause(&mut builder, &mut has_clause);
            builder.push("employee_id = ").push_bind(employee_id);
        }
        if let Some(module_id) = filters.module_id {
            push_clause(&mut builder, &mut has_clause);
            builder.push("module_id = ").push_bind(module_id);
        }
        builder.push(" ORDER BY assigned_at DESC");
        let rows = builder
            .build_query_as::<KssAssignment>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Locks the assignment row for the rest of the transaction.
    pub async fn find_for_update(
        &self,
        tx: &mut sqlx::PgConnection,
        id: KssAssignmentId,
    ) -> Result<KssAssignment, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 FOR UPDATE",
            ASSIGNMENT_COLUMNS, ASSIGNMENT_TABLE
        );
        sqlx::query_as::<_, KssAssignment>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".into()))
    }

    pub async fn save_progress(
        &self,
        tx: &mut sqlx::PgConnection,
        item: &KssAssignment,
    ) -> Result<KssAssignment, AppError> {
        let query = format!(
            "UPDATE {} SET status = $2, completed_lesson_ids = $3, score = $4, \
             completed_at = $5 WHERE id = $1 RETURNING {}",
            ASSIGNMENT_TABLE, ASSIGNMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, KssAssignment>(&query)
            .bind(item.id)
            .bind(item.status)
            .bind(&item.completed_lesson_ids)
            .bind(item.score)
            .bind(item.completed_at)
            .fetch_one(&mut *tx)
            .await?;
        Ok(row)
    }
}

impl Repository<KssAssignment> for KssAssignmentRepository {
    const TABLE: &'static str = ASSIGNMENT_TABLE;
    type Id = KssAssignmentId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<KssAssignment>, AppError> {
        self.list(db, &AssignmentFilters::default()).await
    }

    async fn find_by_id(&self, db: &PgPool, id: KssAssignmentId) -> Result<KssAssignment, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            ASSIGNMENT_COLUMNS, ASSIGNMENT_TABLE
        );
        sqlx::query_as::<_, KssAssignment>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &KssAssignment) -> Result<KssAssignment, AppError> {
        let query = format!(
            "INSERT INTO {} (id, module_id, employee_id, status, completed_lesson_ids, score, \
             due_date, assigned_at, completed_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            ASSIGNMENT_TABLE, ASSIGNMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, KssAssignment>(&query)
            .bind(item.id)
            .bind(item.module_id)
            .bind(item.employee_id)
            .bind(item.status)
            .bind(&item.completed_lesson_ids)
            .bind(item.score)
            .bind(item.due_date)
            .bind(item.assigned_at)
            .bind(item.completed_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &KssAssignment) -> Result<KssAssignment, AppError> {
        let query = format!(
            "UPDATE {} SET status = $2, completed_lesson_ids = $3, score = $4, due_date = $5, \
             completed_at = $6 WHERE id = $1 RETURNING {}",
            ASSIGNMENT_TABLE, ASSIGNMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, KssAssignment>(&query)
            .bind(item.id)
            .bind(item.status)
            .bind(&item.completed_lesson_ids)
            .bind(item.score)
            .bind(item.due_date)
            .bind(item.completed_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: KssAssignmentId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", ASSIGNMENT_TABLE);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Assignment")
    }
}
