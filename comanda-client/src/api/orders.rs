//! Order API

use crate::error::ClientResult;
use crate::http::HttpTransport;
use shared::models::{Order, OrderCreate, OrderStatus, OrderUpdateStatus};

/// Typed handle for order endpoints.
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: HttpTransport,
}

impl OrderApi {
    pub(crate) fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Order>> {
        self.http.get("/api/orders").await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Order> {
        self.http.get(&format!("/api/orders/{id}")).await
    }

    /// Submits a new order. The backend assigns id, order number and
    /// creation timestamp.
    pub async fn create(&self, data: &OrderCreate) -> ClientResult<Order> {
        self.http.post("/api/orders", data).await
    }

    /// Moves an order to a new lifecycle status.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        let body = OrderUpdateStatus { status };
        self.http
            .put(&format!("/api/orders/{id}/status"), &body)
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/api/orders/{id}")).await
    }
}
