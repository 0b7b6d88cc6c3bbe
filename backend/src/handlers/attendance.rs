use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    handlers::common::{
        parse_optional_date, parse_optional_id, ApiResponse, ApiResult, AppJson, AppPath,
        AppQuery,
    },
    models::{
        attendance::{AttendancePayload, AttendanceRecord},
        employee::Employee,
    },
    repositories::{AttendanceFilters, AttendanceRepository, EmployeeRepository, Repository},
    state::AppState,
    types::{AttendanceId, EmployeeId},
    utils::csv::render_csv,
    validation::validate_payload,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AttendanceListQuery {
    pub employee_id: Option<String>,
    /// Inclusive, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive, `YYYY-MM-DD`.
    pub to: Option<String>,
}

impl AttendanceListQuery {
    fn into_filters(self) -> Result<AttendanceFilters, AppError> {
        let filters = AttendanceFilters {
            employee_id: parse_optional_id(self.employee_id.as_deref(), "employee_id")?,
            from: parse_optional_date(self.from.as_deref(), "from")?,
            to: parse_optional_date(self.to.as_deref(), "to")?,
        };
        if let (Some(from), Some(to)) = (filters.from, filters.to) {
            if from > to {
                return Err(AppError::BadRequest("`from` must not be after `to`".into()));
            }
        }
        Ok(filters)
    }
}

pub async fn list_attendance(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AttendanceListQuery>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let filters = query.into_filters()?;
    let records = AttendanceRepository::new().list(&state.pool, &filters).await?;
    Ok(ApiResponse::ok(records))
}

pub async fn create_attendance(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AttendancePayload>,
) -> ApiResult<AttendanceRecord> {
    validate_payload(&payload)?;
    EmployeeRepository::new()
        .find_by_id(&state.pool, payload.employee_id)
        .await?;
    let record = AttendanceRecord::from_payload(payload);
    let saved = AttendanceRepository::new().create(&state.pool, &record).await?;
    Ok(ApiResponse::created(saved).with_message("Attendance recorded"))
}

pub async fn update_attendance(
    State(state): State<AppState>,
    AppPath(id): AppPath<AttendanceId>,
    AppJson(payload): AppJson<AttendancePayload>,
) -> ApiResult<AttendanceRecord> {
    validate_payload(&payload)?;
    let repo = AttendanceRepository::new();
    let mut record = repo.find_by_id(&state.pool, id).await?;
    record.apply(payload);
    let saved = repo.update(&state.pool, &record).await?;
    Ok(ApiResponse::ok(saved).with_message("Attendance updated"))
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    AppPath(id): AppPath<AttendanceId>,
) -> ApiResult<Option<()>> {
    AttendanceRepository::new().delete(&state.pool, id).await?;
    Ok(ApiResponse::message_only("Attendance deleted"))
}

const EXPORT_HEADERS: [&str; 8] = [
    "Date",
    "Employee Code",
    "Employee Name",
    "Department",
    "Check In",
    "Check Out",
    "Status",
    "Note",
];

fn export_rows(
    records: &[AttendanceRecord],
    employees: &HashMap<EmployeeId, Employee>,
) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let employee = employees.get(&record.employee_id);
            vec![
                record.date.format("%Y-%m-%d").to_string(),
                employee.map(|e| e.employee_code.clone()).unwrap_or_default(),
                employee
                    .map(|e| e.full_name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                employee.map(|e| e.department.clone()).unwrap_or_default(),
                record
                    .check_in
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                record
                    .check_out
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                record.status.join("|"),
                record.note.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

fn export_filename(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    match (from, to) {
        (Some(from), Some(to)) => format!(
            "attendance_{}_{}.csv",
            from.format("%Y%m%d"),
            to.format("%Y%m%d")
        ),
        _ => "attendance.csv".to_string(),
    }
}

/// CSV export with the same filters as the list endpoint.
pub async fn export_attendance(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AttendanceListQuery>,
) -> Result<Response, AppError> {
    let filters = query.into_filters()?;
    let records = AttendanceRepository::new().list(&state.pool, &filters).await?;
    let employees: HashMap<EmployeeId, Employee> = EmployeeRepository::new()
        .find_all(&state.pool)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let body = render_csv(&EXPORT_HEADERS, &export_rows(&records, &employees))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(filters.from, filters.to)
    );
    tracing::info!(rows = records.len(), "Attendance exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
