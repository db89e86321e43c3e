//! Checkout - turns a cart into an order submission
//!
//! Two stages: `blockers()` lists the human-readable reasons a cart is
//! not submittable yet (shown next to the submit button, not raised),
//! and `build()` resolves every cart line against the current catalog
//! into item snapshots. A line whose product no longer resolves fails
//! the whole build; there is no partial submit.

use crate::cart::Cart;
use crate::catalog::CatalogStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderCreate, OrderItem};
use shared::money;

/// Target and customer details collected before submission.
#[derive(Debug, Clone, Default)]
pub struct CheckoutDraft {
    pub space_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutDraft {
    /// Reasons the order cannot be submitted yet, in display order.
    /// Empty means ready.
    pub fn blockers(&self, cart: &Cart) -> Vec<String> {
        let mut blockers = Vec::new();
        if self
            .space_id
            .as_deref()
            .is_none_or(|s| s.trim().is_empty())
        {
            blockers.push(ErrorCode::SpaceNotSelected.message().to_string());
        }
        if cart.is_empty() {
            blockers.push(ErrorCode::OrderEmpty.message().to_string());
        }
        if self.customer_name.trim().is_empty() {
            blockers.push(ErrorCode::CustomerNameRequired.message().to_string());
        }
        blockers
    }

    /// Resolves the cart into an [`OrderCreate`] payload.
    ///
    /// Every line is re-priced from the catalog's *current* product, so
    /// an admin price change between adding and submitting wins. The
    /// item snapshot carries the name and unit price at this moment.
    pub fn build(&self, cart: &Cart, catalog: &CatalogStore) -> AppResult<OrderCreate> {
        if let Some(reason) = self.blockers(cart).into_iter().next() {
            return Err(AppError::validation(reason));
        }
        // blockers() guarantees the space id is present
        let space_id = self
            .space_id
            .clone()
            .ok_or_else(|| AppError::new(ErrorCode::SpaceNotSelected))?;

        let mut items = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let product_id = line
                .product
                .id
                .clone()
                .ok_or_else(|| AppError::validation("cart line has no product id"))?;
            let current = catalog.product(&product_id).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("product no longer in catalog: {}", line.product.name),
                )
                .with_detail("productId", product_id.clone())
            })?;

            items.push(OrderItem {
                product_id,
                name: current.name.clone(),
                quantity: line.quantity,
                unit_price: current.price,
                total_price: money::line_total(current.price, line.quantity),
                notes: None,
                selections: Vec::new(),
            });
        }

        let total_amount = money::round_currency(items.iter().map(|i| i.total_price).sum());

        Ok(OrderCreate {
            space_id,
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.clone(),
            items,
            total_amount,
            notes: self.notes.clone(),
        })
    }
}
