use uuid::Uuid;

use super::{
    client::{with_query, ApiClient},
    types::{ApiError, AttendancePayload, AttendanceQuery, AttendanceRecord},
};

impl ApiClient {
    pub async fn get_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let path = with_query(
            "/attendance",
            &[
                ("employee_id", query.employee_id.map(|id| id.to_string())),
                ("from", query.from.map(|d| d.format("%Y-%m-%d").to_string())),
                ("to", query.to.map(|d| d.format("%Y-%m-%d").to_string())),
            ],
        );
        self.get(&path).await
    }

    pub async fn create_attendance(
        &self,
        payload: &AttendancePayload,
    ) -> Result<AttendanceRecord, ApiError> {
        self.post("/attendance", payload).await
    }

    pub async fn update_attendance(
        &self,
        id: Uuid,
        payload: &AttendancePayload,
    ) -> Result<AttendanceRecord, ApiError> {
        self.put(&format!("/attendance/{}", id), payload).await
    }

    pub async fn delete_attendance(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/attendance/{}", id)).await
    }
}
