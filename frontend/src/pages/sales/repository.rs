use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

use crate::api::{
    ApiClient, ApiError, Customer, CustomerPayload, Order, OrderPayload, OrderQuery, Product,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSnapshot {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SalesCommand {
    SaveCustomer(Option<Uuid>, CustomerPayload),
    DeleteCustomer(Uuid),
    SaveOrder(Option<Uuid>, OrderPayload),
    DeleteOrder(Uuid),
    SetOrderStatus(Uuid, String),
}

#[derive(Clone)]
pub struct SalesRepository {
    client: Rc<ApiClient>,
}

impl SalesRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self, status: Option<String>) -> Result<SalesSnapshot, ApiError> {
        let query = OrderQuery {
            customer_id: None,
            status,
        };
        let (customers, orders, products) = futures::join!(
            self.client.get_customers(),
            self.client.get_orders(&query),
            self.client.get_products()
        );
        Ok(SalesSnapshot {
            customers: customers?,
            orders: orders?,
            products: products?,
        })
    }

    pub async fn execute(&self, command: SalesCommand) -> Result<String, ApiError> {
        let client = &self.client;
        let message = match command {
            SalesCommand::SaveCustomer(Some(id), payload) => {
                let customer = client.update_customer(id, &payload).await?;
                format!("Customer {} updated", customer.name)
            }
            SalesCommand::SaveCustomer(None, payload) => {
                let customer = client.create_customer(&payload).await?;
                format!("Customer {} created", customer.name)
            }
            SalesCommand::DeleteCustomer(id) => {
                client.delete_customer(id).await?;
                "Customer deleted".to_string()
            }
            SalesCommand::SaveOrder(Some(id), payload) => {
                let order = client.update_order(id, &payload).await?;
                format!("Order {} updated", order.order_number)
            }
            SalesCommand::SaveOrder(None, payload) => {
                let order = client.create_order(&payload).await?;
                format!("Order {} created", order.order_number)
            }
            SalesCommand::DeleteOrder(id) => {
                client.delete_order(id).await?;
                "Order deleted".to_string()
            }
            SalesCommand::SetOrderStatus(id, status) => {
                let order = client.update_order_status(id, &status).await?;
                format!("Order {} is now {}", order.order_number, order.status)
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

    #[tokio::test]
    async fn load_passes_status_filter_to_orders() {
        let server = MockServer::start();
        for path in ["/api/sales/customers", "/api/sales/orders", "/api/inventory/products"] {
            server.mock(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(ok(json!([])));
            });
        }
        let repo = SalesRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let snapshot = repo.load(Some("pending".into())).await.unwrap();
        assert!(snapshot.orders.is_empty());
        let orders_request = server
            .received()
            .into_iter()
            .find(|r| r.path == "/api/sales/orders")
            .unwrap();
        assert_eq!(orders_request.query.as_deref(), Some("status=pending"));
    }

    #[tokio::test]
    async fn rejected_transition_surfaces_bad_request() {
        let server = MockServer::start();
        let id = Uuid::parse_str("77777777-7777-4777-8777-777777777777").unwrap();
        server.mock(|when, then| {
            when.method(PUT).path(&format!("/api/sales/orders/{}/status", id));
            then.status(400).json_body(failure(
                "BAD_REQUEST",
                "Order status cannot change from delivered to cancelled",
            ));
        });
        let repo = SalesRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let err = repo
            .execute(SalesCommand::SetOrderStatus(id, "cancelled".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code, "BAD_REQUEST");
        assert!(err.error.contains("delivered"));
    }
}
