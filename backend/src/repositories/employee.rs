//! Employee repository.

use crate::error::AppError;
use crate::models::employee::{Employee, EmployeeStatus};
use crate::repositories::common::{ensure_affected, like_pattern, push_clause};
use crate::repositories::repository::Repository;
use crate::types::EmployeeId;
use sqlx::{PgPool, Postgres, QueryBuilder};

const TABLE_NAME: &str = "employees";
const SELECT_COLUMNS: &str = "id, employee_code, full_name, email, phone, department, position, \
     role, status, hire_date, avatar_url, signature_url, created_at, updated_at";

#[derive(Debug, Default, Clone)]
pub struct EmployeeFilters {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmployeeRepository;

impl EmployeeRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        db: &PgPool,
        filters: &EmployeeFilters,
    ) -> Result<Vec<Employee>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            SELECT_COLUMNS, TABLE_NAME
        ));
        let mut has_clause = false;
        if let Some(pattern) = like_pattern(filters.search.as_deref()) {
            push_clause(&mut builder, &mut has_clause);
            builder
                .push("(full_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR employee_code ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(department) = filters
            .department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            push_clause(&mut builder, &mut has_clause);
            builder.push("department = ").push_bind(department.to_string());
        }
        if let Some(status) = filters.status {
            push_clause(&mut builder, &mut has_clause);
            builder.push("status = ").push_bind(status);
        }
        builder.push(" ORDER BY full_name ASC");
        let rows = builder.build_query_as::<Employee>().fetch_all(db).await?;
        Ok(rows)
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

impl Repository<Employee> for EmployeeRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = EmployeeId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Employee>, AppError> {
        self.list(db, &EmployeeFilters::default()).await
    }

    async fn find_by_id(&self, db: &PgPool, id: EmployeeId) -> Result<Employee, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    async fn create(&self, db: &PgPool, item: &Employee) -> Result<Employee, AppError> {
        let query = format!(
            "INSERT INTO {} (id, employee_code, full_name, email, phone, department, position, \
             role, status, hire_date, avatar_url, signature_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Employee>(&query)
            .bind(item.id)
            .bind(&item.employee_code)
            .bind(&item.full_name)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.department)
            .bind(&item.position)
            .bind(item.role)
            .bind(item.status)
            .bind(item.hire_date)
            .bind(&item.avatar_url)
            .bind(&item.signature_url)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Employee) -> Result<Employee, AppError> {
        let query = format!(
            "UPDATE {} SET employee_code = $2, full_name = $3, email = $4, phone = $5, \
             department = $6, position = $7, role = $8, status = $9, hire_date = $10, \
             avatar_url = $11, signature_url = $12, updated_at = $13 \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Employee>(&query)
            .bind(item.id)
            .bind(&item.employee_code)
            .bind(&item.full_name)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.department)
            .bind(&item.position)
            .bind(item.role)
            .bind(item.status)
            .bind(item.hire_date)
            .bind(&item.avatar_url)
            .bind(&item.signature_url)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: EmployeeId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        ensure_affected(result, "Employee")
    }
}
