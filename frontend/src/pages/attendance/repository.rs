use crate::api::{
    ApiClient, ApiError, AttendancePayload, AttendanceQuery, AttendanceRecord, Employee,
    EmployeeQuery,
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

/// Records together with the employees used to label them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    pub records: Vec<AttendanceRecord>,
    pub employees: Vec<Employee>,
}

#[derive(Clone)]
pub struct AttendanceRepository {
    client: Rc<ApiClient>,
}

impl AttendanceRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches records and the employee directory concurrently.
    pub async fn load(&self, query: AttendanceQuery) -> Result<AttendanceSnapshot, ApiError> {
        let directory = EmployeeQuery::default();
        let (records, employees) = futures::join!(
            self.client.get_attendance(&query),
            self.client.get_employees(&directory)
        );
        Ok(AttendanceSnapshot {
            records: records?,
            employees: employees?,
        })
    }

    pub async fn save(
        &self,
        id: Option<Uuid>,
        payload: AttendancePayload,
    ) -> Result<AttendanceRecord, ApiError> {
        match id {
            Some(id) => self.client.update_attendance(id, &payload).await,
            None => self.client.create_attendance(&payload).await,
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete_attendance(id).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn load_fails_when_either_collection_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/attendance");
            then.status(200).json_body(ok(json!([])));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(500)
                .json_body(failure("INTERNAL_SERVER_ERROR", "Internal server error"));
        });
        let repo =
            AttendanceRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(server.url("/api"))));

        let err = repo.load(AttendanceQuery::default()).await.unwrap_err();
        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(server.received().len(), 2);
    }
}
