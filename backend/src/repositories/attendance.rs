//! Attendance repository.

use crate::error::AppError;
use crate::models::attendance::AttendanceRecord;
use crate::repositories::common::{ensure_affected, push_clause};
use crate::repositories::repository::Repository;
use crate::types::{AttendanceId, EmployeeId};
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

const TABLE_NAME: &str = "attendance_records";
const SELECT_COLUMNS: &str =
    "id, employee_id, date, check_in, check_out, status, note, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct AttendanceFilters {
    pub employee_id: Option<EmployeeId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AttendanceRepository;

impl AttendanceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        db: &PgPool,
        filters: &AttendanceFilters,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            SELECT_COLUMNS, TABLE_NAME
        ));
        let mut has_clause = false;
        if let Some(employee_id) = filters.employee_id {
            push_clause(&mut builder, &mut has_clause);
            builder.push("employee_id = ").push_bind(employee_id);
        }
        if let Some(from) = filters.from {
            push_clause(&mut builder, &mut has_clause);
            builder.push("date >= ").push_bind(from);
        }
        if let Some(to) = filters.to {
            push_clause(&mut builder, &mut has_clause);
            builder.push("date <= ").push_bind(to);
        }
        builder.push(" ORDER BY date DESC, check_in ASC NULLS LAST");
        let rows = builder
            .build_query_as::<AttendanceRecord>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

impl Repository<AttendanceRecord> for AttendanceRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = AttendanceId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<AttendanceRecord>, AppError> {
        self.list(db, &AttendanceFilters::default()).await
    }

    async fn find_by_id(&self, db: &PgPool, id: AttendanceId) -> Result<AttendanceRecord, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Attendance record not found".into()))
    }

    async fn create(
        &self,
        db: &PgPool,
        item: &AttendanceRecord,
    ) -> Result<AttendanceRecord, AppError> {
        let query = format!(
            "INSERT INTO {} (id, employee_id, date, check_in, check_out, status, note, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(item.id)
            .bind(item.employee_id)
            .bind(item.date)
            .bind(item.check_in)
            .bind(item.check_out)
            .bind(&item.status)
            .bind(&item.note)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        item: &AttendanceRecord,
    ) -> Result<AttendanceRecord, AppError> {
        let query = format!(
            "UPDATE {} SET employee_id = $2, date = $3, check_in = $4, check_out = $5, \
             status = $6, note = $7, updated_at = $8 WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(item.id)
            .bind(item.employee_id)
            .bind(item.date)
            .bind(item.check_in)
            .bind(item.check_out)
            .bind(&item.status)
            .bind(&item.note)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: AttendanceId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Attendance record")
    }
}
