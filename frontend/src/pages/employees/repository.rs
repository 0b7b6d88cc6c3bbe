use crate::api::{ApiClient, ApiError, Employee, EmployeePayload, EmployeeQuery};
use std::rc::Rc;
use uuid::Uuid;

#[derive(Clone)]
pub struct EmployeesRepository {
    client: Rc<ApiClient>,
}

impl EmployeesRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Employee>, ApiError> {
        self.client.get_employees(&EmployeeQuery::default()).await
    }

    pub async fn save(
        &self,
        id: Option<Uuid>,
        payload: EmployeePayload,
    ) -> Result<Employee, ApiError> {
        match id {
            Some(id) => self.client.update_employee(id, &payload).await,
            None => self.client.create_employee(&payload).await,
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete_employee(id).await
    }
}
