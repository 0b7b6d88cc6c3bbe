use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

use crate::api::{
    ApiClient, ApiError, BatchDetail, BatchPayload, BomLine, BomLinePayload, Component,
    ComponentPayload, Product, ProductPayload, Supplier, SupplierPayload,
};

/// Suppliers, stock, products with their BOM lines and batches with items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub suppliers: Vec<Supplier>,
    pub components: Vec<Component>,
    pub products: Vec<Product>,
    pub bom_lines: Vec<BomLine>,
    pub batches: Vec<BatchDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    SaveSupplier(Option<Uuid>, SupplierPayload),
    DeleteSupplier(Uuid),
    SaveComponent(Option<Uuid>, ComponentPayload),
    DeleteComponent(Uuid),
    SaveProduct(Option<Uuid>, ProductPayload),
    DeleteProduct(Uuid),
    ReplaceBom(Uuid, Vec<BomLinePayload>),
    SaveBatch(Option<Uuid>, BatchPayload),
    DeleteBatch(Uuid),
    AdvanceBatch(Uuid, String),
}

#[derive(Clone)]
pub struct InventoryRepository {
    client: Rc<ApiClient>,
}

impl InventoryRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<InventorySnapshot, ApiError> {
        let client = &self.client;
        let (suppliers, components, products, batches) = futures::join!(
            client.get_suppliers(),
            client.get_components(),
            client.get_products(),
            client.get_batches(None)
        );
        let products = products?;
        let batches = batches?;
        let (bom_lines, batches) = futures::join!(
            try_join_all(products.iter().map(|p| client.get_product_components(p.id))),
            try_join_all(batches.iter().map(|b| client.get_batch(b.id)))
        );
        Ok(InventorySnapshot {
            suppliers: suppliers?,
            components: components?,
            products,
            bom_lines: bom_lines?.into_iter().flatten().collect(),
            batches: batches?,
        })
    }

    pub async fn execute(&self, command: InventoryCommand) -> Result<String, ApiError> {
        let client = &self.client;
        let message = match command {
            InventoryCommand::SaveSupplier(Some(id), payload) => {
                let supplier = client.update_supplier(id, &payload).await?;
                format!("Supplier {} updated", supplier.name)
            }
            InventoryCommand::SaveSupplier(None, payload) => {
                let supplier = client.create_supplier(&payload).await?;
                format!("Supplier {} created", supplier.name)
            }
            InventoryCommand::DeleteSupplier(id) => {
                client.delete_supplier(id).await?;
                "Supplier deleted".to_string()
            }
            InventoryCommand::SaveComponent(Some(id), payload) => {
                let component = client.update_component(id, &payload).await?;
                format!("Component {} updated", component.sku)
            }
            InventoryCommand::SaveComponent(None, payload) => {
                let component = client.create_component(&payload).await?;
                format!("Component {} created", component.sku)
            }
            InventoryCommand::DeleteComponent(id) => {
                client.delete_component(id).await?;
                "Component deleted".to_string()
            }
            InventoryCommand::SaveProduct(Some(id), payload) => {
                let product = client.update_product(id, &payload).await?;
                format!("Product {} updated", product.sku)
            }
            InventoryCommand::SaveProduct(None, payload) => {
                let product = client.create_product(&payload).await?;
                format!("Product {} created", product.sku)
            }
            InventoryCommand::DeleteProduct(id) => {
                client.delete_product(id).await?;
                "Product deleted".to_string()
            }
            InventoryCommand::ReplaceBom(product_id, lines) => {
                let saved = client.replace_product_components(product_id, &lines).await?;
                format!("Bill of materials saved ({} lines)", saved.len())
            }
            InventoryCommand::SaveBatch(Some(id), payload) => {
                let detail = client.update_batch(id, &payload).await?;
                format!("Batch {} updated", detail.batch.batch_code)
            }
            InventoryCommand::SaveBatch(None, payload) => {
                let detail = client.create_batch(&payload).await?;
                format!("Batch {} created", detail.batch.batch_code)
            }
            InventoryCommand::DeleteBatch(id) => {
                client.delete_batch(id).await?;
                "Batch deleted".to_string()
            }
            InventoryCommand::AdvanceBatch(id, status) => {
                let batch = client.update_batch_status(id, &status).await?;
                format!("Batch {} is now {}", batch.batch_code, batch.status)
            }
        };
        Ok(message)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    const PRODUCT_ID: &str = "33333333-3333-4333-8333-333333333333";
    const COMPONENT_ID: &str = "44444444-4444-4444-8444-444444444444";
    const SUPPLIER_ID: &str = "55555555-5555-4555-8555-555555555555";
    const BATCH_ID: &str = "66666666-6666-4666-8666-666666666666";

    fn batch_json() -> serde_json::Value {
        json!({
            "id": BATCH_ID,
            "batch_code": "B-001",
            "supplier_id": SUPPLIER_ID,
            "status": "in-transit",
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn load_collects_bom_lines_and_batch_items() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/inventory/suppliers");
            then.status(200).json_body(ok(json!([])));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/inventory/components");
            then.status(200).json_body(ok(json!([])));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/inventory/products");
            then.status(200).json_body(ok(json!([{
                "id": PRODUCT_ID,
                "sku": "KIT",
                "name": "Kit",
                "price": 10.0,
                "created_at": "2025-03-01T00:00:00Z",
                "updated_at": "2025-03-01T00:00:00Z"
            }])));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path(&format!("/api/inventory/products/{}/components", PRODUCT_ID));
            then.status(200).json_body(ok(json!([{
                "product_id": PRODUCT_ID,
                "component_id": COMPONENT_ID,
                "quantity": 2
            }])));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/inventory/batches");
            then.status(200).json_body(ok(json!([batch_json()])));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path(&format!("/api/inventory/batches/{}", BATCH_ID));
            let mut detail = batch_json();
            detail["items"] = json!([{ "component_id": COMPONENT_ID, "quantity": 40 }]);
            then.status(200).json_body(ok(detail));
        });
        let repo = InventoryRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let snapshot = repo.load().await.unwrap();
        assert_eq!(snapshot.bom_lines.len(), 1);
        assert_eq!(snapshot.bom_lines[0].quantity, 2);
        assert_eq!(snapshot.batches[0].items[0].quantity, 40);
    }

    #[tokio::test]
    async fn advancing_a_batch_reports_the_new_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT)
                .path(&format!("/api/inventory/batches/{}/status", BATCH_ID));
            let mut batch = batch_json();
            batch["status"] = json!("processing");
            then.status(200).json_body(ok(batch));
        });
        let repo = InventoryRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let id = Uuid::parse_str(BATCH_ID).unwrap();
        let message = repo
            .execute(InventoryCommand::AdvanceBatch(id, "processing".into()))
            .await
            .unwrap();
        assert_eq!(message, "Batch B-001 is now processing");
        assert_eq!(server.received()[0].body, Some(json!({ "status": "processing" })));
    }

    #[tokio::test]
    async fn component_in_use_surfaces_conflict() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE)
                .path(&format!("/api/inventory/components/{}", COMPONENT_ID));
            then.status(409)
                .json_body(failure("CONFLICT", "Component is used by a product"));
        });
        let repo = InventoryRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let id = Uuid::parse_str(COMPONENT_ID).unwrap();
        let err = repo
            .execute(InventoryCommand::DeleteComponent(id))
            .await
            .unwrap_err();
        assert_eq!(err.code, "CONFLICT");
    }
}
