use serde_json::json;
use uuid::Uuid;

use super::{
    client::{with_query, ApiClient},
    types::{
        ApiError, Batch, BatchDetail, BatchPayload, BomLine, BomLinePayload, Component,
        ComponentPayload, Product, ProductPayload, Supplier, SupplierPayload,
    },
};

impl ApiClient {
    pub async fn get_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.get("/inventory/suppliers").await
    }

    pub async fn create_supplier(&self, payload: &SupplierPayload) -> Result<Supplier, ApiError> {
        self.post("/inventory/suppliers", payload).await
    }

    pub async fn update_supplier(
        &self,
        id: Uuid,
        payload: &SupplierPayload,
    ) -> Result<Supplier, ApiError> {
        self.put(&format!("/inventory/suppliers/{}", id), payload)
            .await
    }

    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/inventory/suppliers/{}", id)).await
    }

    pub async fn get_components(&self) -> Result<Vec<Component>, ApiError> {
        self.get("/inventory/components").await
    }

    pub async fn create_component(
        &self,
        payload: &ComponentPayload,
    ) -> Result<Component, ApiError> {
        self.post("/inventory/components", payload).await
    }

    pub async fn update_component(
        &self,
        id: Uuid,
        payload: &ComponentPayload,
    ) -> Result<Component, ApiError> {
        self.put(&format!("/inventory/components/{}", id), payload)
            .await
    }

    pub async fn delete_component(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/inventory/components/{}", id)).await
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/inventory/products").await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        self.post("/inventory/products", payload).await
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/inventory/products/{}", id), payload)
            .await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/inventory/products/{}", id)).await
    }

    pub async fn get_product_components(&self, product_id: Uuid) -> Result<Vec<BomLine>, ApiError> {
        self.get(&format!("/inventory/products/{}/components", product_id))
            .await
    }

    pub async fn replace_product_components(
        &self,
        product_id: Uuid,
        lines: &[BomLinePayload],
    ) -> Result<Vec<BomLine>, ApiError> {
        self.put(
            &format!("/inventory/products/{}/components", product_id),
            &json!({ "components": lines }),
        )
        .await
    }

    pub async fn get_batches(&self, status: Option<&str>) -> Result<Vec<Batch>, ApiError> {
        let path = with_query(
            "/inventory/batches",
            &[("status", status.map(str::to_string))],
        );
        self.get(&path).await
    }

    pub async fn get_batch(&self, id: Uuid) -> Result<BatchDetail, ApiError> {
        self.get(&format!("/inventory/batches/{}", id)).await
    }

    pub async fn create_batch(&self, payload: &BatchPayload) -> Result<BatchDetail, ApiError> {
        self.post("/inventory/batches", payload).await
    }

    pub async fn update_batch(
        &self,
        id: Uuid,
        payload: &BatchPayload,
    ) -> Result<BatchDetail, ApiError> {
        self.put(&format!("/inventory/batches/{}", id), payload)
            .await
    }

    pub async fn delete_batch(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/inventory/batches/{}", id)).await
    }

    pub async fn update_batch_status(&self, id: Uuid, status: &str) -> Result<Batch, ApiError> {
        self.put(
            &format!("/inventory/batches/{}/status", id),
            &json!({ "status": status }),
        )
        .await
    }
}
