//! Order desk - the order collection workflow
//!
//! The desk keeps a working copy of the backend's order collection and
//! funnels every mutation through one request plus a reload. Local
//! state only changes after the backend confirms; a failed request
//! leaves the copy untouched for the user to retry.

use crate::cart::Cart;
use crate::catalog::CatalogStore;
use crate::checkout::CheckoutDraft;
use crate::lifecycle::OrderAction;
use crate::service::OrderService;
use crate::view::{self, BoardQuery, OrderStats};
use shared::error::{AppError, AppResult};
use shared::models::Order;
use std::sync::Arc;

pub struct OrderDesk {
    service: Arc<dyn OrderService>,
    orders: Vec<Order>,
}

impl OrderDesk {
    pub fn new(service: Arc<dyn OrderService>) -> Self {
        Self {
            service,
            orders: Vec::new(),
        }
    }

    /// Replaces the working copy with the backend's collection.
    pub async fn reload(&mut self) -> AppResult<()> {
        self.orders = self.service.list_orders().await?;
        tracing::debug!(count = self.orders.len(), "orders reloaded");
        Ok(())
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id.as_deref() == Some(id))
    }

    /// Filtered, sorted projection for the management view.
    pub fn board(&self, query: &BoardQuery) -> Vec<&Order> {
        query.apply(&self.orders)
    }

    /// Headline numbers, always over the unfiltered collection.
    pub fn stats(&self) -> OrderStats {
        view::stats(&self.orders)
    }

    /// Submits the cart as a new order.
    ///
    /// The cart is cleared only after the backend accepts; a rejected
    /// submission leaves it intact for correction.
    pub async fn submit(
        &mut self,
        draft: &CheckoutDraft,
        cart: &mut Cart,
        catalog: &CatalogStore,
    ) -> AppResult<Order> {
        let payload = draft.build(cart, catalog)?;
        let item_count = payload.items.len();

        let created = self.service.create_order(payload).await?;
        cart.clear();
        tracing::info!(
            order_number = %created.order_number,
            items = item_count,
            total = created.total_amount,
            "order submitted"
        );

        self.reload().await?;
        Ok(created)
    }

    /// Applies a lifecycle action to an order.
    ///
    /// Legality is checked against the cached status first so the UI
    /// can reject without a round trip; the backend remains the
    /// authority and re-validates.
    pub async fn apply(&mut self, order_id: &str, action: OrderAction) -> AppResult<Order> {
        if let Some(order) = self.order(order_id)
            && !action.is_allowed_from(order.status)
        {
            return Err(AppError::transition(format!(
                "{} is not allowed while the order is {}",
                action.label(),
                order.status.label()
            )));
        }

        let updated = self
            .service
            .update_order_status(order_id, action.target_status())
            .await?;
        tracing::info!(
            order_id = %order_id,
            status = updated.status.label(),
            "order status updated"
        );

        self.reload().await?;
        Ok(updated)
    }

    /// Deletes an order; only PENDIENTE and CANCELADO qualify.
    pub async fn delete(&mut self, order_id: &str) -> AppResult<()> {
        if let Some(order) = self.order(order_id)
            && !order.status.can_delete()
        {
            return Err(AppError::not_deletable(format!(
                "orders in {} cannot be deleted",
                order.status.label()
            )));
        }

        self.service.delete_order(order_id).await?;
        tracing::info!(order_id = %order_id, "order deleted");

        self.reload().await
    }
}
