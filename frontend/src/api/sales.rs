use serde_json::json;
use uuid::Uuid;

use super::{
    client::{with_query, ApiClient},
    types::{ApiError, Customer, CustomerPayload, Order, OrderPayload, OrderQuery},
};

impl ApiClient {
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get("/sales/customers").await
    }

    pub async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, ApiError> {
        self.post("/sales/customers", payload).await
    }

    pub async fn update_customer(
        &self,
        id: Uuid,
        payload: &CustomerPayload,
    ) -> Result<Customer, ApiError> {
        self.put(&format!("/sales/customers/{}", id), payload).await
    }

    pub async fn delete_customer(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/sales/customers/{}", id)).await
    }

    pub async fn get_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, ApiError> {
        let path = with_query(
            "/sales/orders",
            &[
                ("customer_id", query.customer_id.map(|id| id.to_string())),
                ("status", query.status.clone()),
            ],
        );
        self.get(&path).await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, ApiError> {
        self.get(&format!("/sales/orders/{}", id)).await
    }

    pub async fn create_order(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        self.post("/sales/orders", payload).await
    }

    pub async fn update_order(&self, id: Uuid, payload: &OrderPayload) -> Result<Order, ApiError> {
        self.put(&format!("/sales/orders/{}", id), payload).await
    }

    pub async fn delete_order(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/sales/orders/{}", id)).await
    }

    pub async fn update_order_status(&self, id: Uuid, status: &str) -> Result<Order, ApiError> {
        self.put(
            &format!("/sales/orders/{}/status", id),
            &json!({ "status": status }),
        )
        .await
    }
}
