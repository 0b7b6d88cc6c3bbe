use uuid::Uuid;

use super::{
    client::{with_query, ApiClient},
    types::{ApiError, Employee, EmployeePayload, EmployeeQuery},
};

impl ApiClient {
    pub async fn get_employees(&self, query: &EmployeeQuery) -> Result<Vec<Employee>, ApiError> {
        let path = with_query(
            "/employees",
            &[
                ("search", query.search.clone()),
                ("department", query.department.clone()),
                ("status", query.status.clone()),
            ],
        );
        self.get(&path).await
    }

    pub async fn get_employee(&self, id: Uuid) -> Result<Employee, ApiError> {
        self.get(&format!("/employees/{}", id)).await
    }

    pub async fn create_employee(&self, payload: &EmployeePayload) -> Result<Employee, ApiError> {
        self.post("/employees", payload).await
    }

    pub async fn update_employee(
        &self,
        id: Uuid,
        payload: &EmployeePayload,
    ) -> Result<Employee, ApiError> {
        self.put(&format!("/employees/{}", id), payload).await
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/employees/{}", id)).await
    }
}
