//! Catalog store - read-mostly cache of categories, products and spaces
//!
//! The menu, the space picker and the checkout resolver all read from
//! here. Data is replaced wholesale on refresh; the backend stays
//! authoritative.

use crate::service::{CatalogService, SpaceService};
use shared::error::AppResult;
use shared::models::{Category, Product, Space, SpaceStatus};

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    categories: Vec<Category>,
    products: Vec<Product>,
    spaces: Vec<Space>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-fetched data. Used by tests and
    /// offline seeding; live code goes through [`refresh`](Self::refresh).
    pub fn from_parts(
        categories: Vec<Category>,
        products: Vec<Product>,
        spaces: Vec<Space>,
    ) -> Self {
        Self {
            categories,
            products,
            spaces,
        }
    }

    /// Reloads everything from the backend.
    pub async fn refresh(
        &mut self,
        catalog: &dyn CatalogService,
        spaces: &dyn SpaceService,
    ) -> AppResult<()> {
        self.categories = catalog.list_categories().await?;
        self.products = catalog.list_products().await?;
        self.spaces = spaces.list_spaces().await?;
        tracing::debug!(
            categories = self.categories.len(),
            products = self.products.len(),
            spaces = self.spaces.len(),
            "catalog refreshed"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw collections
    // ------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_deref() == Some(id))
    }

    pub fn product_by_code(&self, code: &str) -> Option<&Product> {
        let code = code.to_lowercase();
        self.products
            .iter()
            .find(|p| p.code.to_lowercase() == code)
    }

    pub fn space(&self, id: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id.as_deref() == Some(id))
    }

    // ------------------------------------------------------------------
    // Menu views
    // ------------------------------------------------------------------

    /// Active categories in display order.
    pub fn active_categories(&self) -> Vec<&Category> {
        let mut active: Vec<&Category> =
            self.categories.iter().filter(|c| c.is_active).collect();
        active.sort_by_key(|c| c.ord);
        active
    }

    /// Orderable products of one category. A product must be both
    /// enabled (admin switch) and available (stock switch) to show up.
    pub fn available_products(&self, category_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id && p.is_enabled && p.is_available)
            .collect()
    }

    /// Spaces a new order can target right now.
    pub fn free_spaces(&self) -> Vec<&Space> {
        self.spaces
            .iter()
            .filter(|s| s.is_active && s.status == SpaceStatus::Libre)
            .collect()
    }
}
