use axum::extract::State;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    handlers::common::{parse_optional_enum, ApiResponse, ApiResult, AppJson, AppPath, AppQuery},
    models::employee::{Employee, EmployeePayload},
    repositories::{EmployeeFilters, EmployeeRepository, Repository},
    state::AppState,
    types::EmployeeId,
    validation::validate_payload,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EmployeeListQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    /// `active` or `inactive`.
    pub status: Option<String>,
}

pub async fn list_employees(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<EmployeeListQuery>,
) -> ApiResult<Vec<Employee>> {
    let filters = EmployeeFilters {
        search: query.search,
        department: query.department,
        status: parse_optional_enum(query.status.as_deref(), "status")?,
    };
    let employees = EmployeeRepository::new().list(&state.pool, &filters).await?;
    Ok(ApiResponse::ok(employees))
}

pub async fn get_employee(
    State(state): State<AppState>,
    AppPath(id): AppPath<EmployeeId>,
) -> ApiResult<Employee> {
    let employee = EmployeeRepository::new().find_by_id(&state.pool, id).await?;
    Ok(ApiResponse::ok(employee))
}

pub async fn create_employee(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmployeePayload>,
) -> ApiResult<Employee> {
    validate_payload(&payload)?;
    let employee = Employee::from_payload(payload);
    let saved = EmployeeRepository::new().create(&state.pool, &employee).await?;
    tracing::info!(employee_id = %saved.id, code = %saved.employee_code, "Employee created");
    Ok(ApiResponse::created(saved).with_message("Employee created"))
}

pub async fn update_employee(
    State(state): State<AppState>,
    AppPath(id): AppPath<EmployeeId>,
    AppJson(payload): AppJson<EmployeePayload>,
) -> ApiResult<Employee> {
    validate_payload(&payload)?;
    let repo = EmployeeRepository::new();
    let mut employee = repo.find_by_id(&state.pool, id).await?;
    employee.apply(payload);
    let saved = repo.update(&state.pool, &employee).await?;
    Ok(ApiResponse::ok(saved).with_message("Employee updated"))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    AppPath(id): AppPath<EmployeeId>,
) -> ApiResult<Option<()>> {
    EmployeeRepository::new().delete(&state.pool, id).await?;
    tracing::info!(employee_id = %id, "Employee deleted");
    Ok(ApiResponse::message_only("Employee deleted"))
}
