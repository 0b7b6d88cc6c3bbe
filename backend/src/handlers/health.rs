use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    handlers::common::{ApiResponse, ApiResult},
    state::AppState,
    utils::now_in_timezone,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub service: String,
    pub version: String,
    pub time_zone: String,
    /// Server time in the configured time zone, RFC 3339.
    pub server_time: String,
}

pub async fn health(State(state): State<AppState>) -> ApiResult<HealthStatus> {
    let tz = state.config.time_zone;
    Ok(ApiResponse::ok(HealthStatus {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        time_zone: tz.name().to_string(),
        server_time: now_in_timezone(&tz).to_rfc3339(),
    }))
}
