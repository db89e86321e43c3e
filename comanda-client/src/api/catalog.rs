//! Catalog API - categories and products

use crate::error::ClientResult;
use crate::http::HttpTransport;
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate,
};

/// Typed handle for catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: HttpTransport,
}

impl CatalogApi {
    pub(crate) fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get("/api/categories").await
    }

    pub async fn create_category(&self, data: &CategoryCreate) -> ClientResult<Category> {
        self.http.post("/api/categories", data).await
    }

    pub async fn update_category(&self, id: &str, data: &CategoryUpdate) -> ClientResult<Category> {
        self.http.put(&format!("/api/categories/{id}"), data).await
    }

    pub async fn delete_category(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/api/categories/{id}")).await
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.http.get("/api/products").await
    }

    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        self.http.get(&format!("/api/products/{id}")).await
    }

    pub async fn create_product(&self, data: &ProductCreate) -> ClientResult<Product> {
        self.http.post("/api/products", data).await
    }

    pub async fn update_product(&self, id: &str, data: &ProductUpdate) -> ClientResult<Product> {
        self.http.put(&format!("/api/products/{id}"), data).await
    }

    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/api/products/{id}")).await
    }
}
