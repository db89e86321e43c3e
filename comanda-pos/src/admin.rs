//! Catalog admin - gated writes to products, categories and spaces
//!
//! The product-create gate runs client-side against the current catalog
//! snapshot so the admin form can reject with a field-identified
//! message before any network call. The backend still owns uniqueness;
//! a write race surfaces as a backend conflict and is re-expressed as
//! the same duplicate message class the local gate would have produced.

use crate::catalog::CatalogStore;
use crate::service::{CatalogService, SpaceService};
use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate, Space,
    SpaceCreate, SpaceUpdate,
};
use std::sync::Arc;

/// A catalog entity under admin edit, tagged by kind.
///
/// Edit and delete handlers match exhaustively; adding a new entity
/// kind fails compilation at every handler instead of falling through.
#[derive(Debug, Clone)]
pub enum CatalogEntry {
    Product(Product),
    Category(Category),
    Space(Space),
}

impl CatalogEntry {
    pub fn kind_label(&self) -> &'static str {
        match self {
            CatalogEntry::Product(_) => "product",
            CatalogEntry::Category(_) => "category",
            CatalogEntry::Space(_) => "space",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            CatalogEntry::Product(p) => p.id.as_deref(),
            CatalogEntry::Category(c) => c.id.as_deref(),
            CatalogEntry::Space(s) => s.id.as_deref(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CatalogEntry::Product(p) => &p.name,
            CatalogEntry::Category(c) => &c.name,
            CatalogEntry::Space(s) => &s.name,
        }
    }
}

// ============================================================================
// Create-product gate
// ============================================================================

/// Validates a new product against the current catalog snapshot.
///
/// Applied on create only; updates go straight to the backend.
pub fn validate_new_product(data: &ProductCreate, catalog: &CatalogStore) -> AppResult<()> {
    let code = data.code.trim();
    if code.is_empty() {
        return Err(field_error(ErrorCode::RequiredField, "code", "Product code is required"));
    }
    // Unicode fold; codes and names carry accented letters
    let code_folded = code.to_lowercase();
    if catalog
        .products()
        .iter()
        .any(|p| p.code.trim().to_lowercase() == code_folded)
    {
        return Err(field_error(
            ErrorCode::ProductCodeExists,
            "code",
            format!("Product code '{}' already exists", code),
        ));
    }

    let name = data.name.trim();
    if name.is_empty() {
        return Err(field_error(ErrorCode::RequiredField, "name", "Product name is required"));
    }
    let name_folded = name.to_lowercase();
    if catalog
        .products()
        .iter()
        .any(|p| p.category_id == data.category_id && p.name.trim().to_lowercase() == name_folded)
    {
        return Err(field_error(
            ErrorCode::ProductNameExists,
            "name",
            format!("Product name '{}' already exists in this category", name),
        ));
    }

    if data.category_id.trim().is_empty() {
        return Err(field_error(
            ErrorCode::RequiredField,
            "categoryId",
            "Category is required",
        ));
    }
    if catalog.category(&data.category_id).is_none() {
        return Err(field_error(
            ErrorCode::CategoryNotFound,
            "categoryId",
            "Selected category does not exist",
        ));
    }

    if !data.price.is_finite() || data.price <= 0.0 {
        return Err(field_error(
            ErrorCode::ProductInvalidPrice,
            "price",
            "Price must be greater than zero",
        ));
    }

    Ok(())
}

fn field_error(code: ErrorCode, field: &str, message: impl Into<String>) -> AppError {
    AppError::with_message(code, message).with_detail("field", field)
}

/// Required-field check for category payloads.
fn validate_category_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(field_error(
            ErrorCode::RequiredField,
            "name",
            "Category name is required",
        ));
    }
    Ok(())
}

/// Required-field check for space payloads.
fn validate_space_fields(code: &str, name: &str) -> AppResult<()> {
    if code.trim().is_empty() {
        return Err(field_error(ErrorCode::RequiredField, "code", "Space code is required"));
    }
    if name.trim().is_empty() {
        return Err(field_error(ErrorCode::RequiredField, "name", "Space name is required"));
    }
    Ok(())
}

// ============================================================================
// Backend conflict translation
// ============================================================================

/// Re-expresses backend write errors in the gate's message classes.
///
/// Typed duplicate codes pass through. Untyped conflicts are classified
/// by message text, the same way storage errors are classified from
/// their strings elsewhere in the stack. Auth, permission and network
/// errors are not save failures and pass through untouched.
fn classify_write_error(err: AppError) -> AppError {
    match err.code {
        ErrorCode::ProductCodeExists
        | ErrorCode::ProductNameExists
        | ErrorCode::SpaceCodeExists
        | ErrorCode::CategoryHasProducts => return err,
        _ => {}
    }
    match err.code.category() {
        ErrorCategory::Auth | ErrorCategory::Permission | ErrorCategory::System => return err,
        _ => {}
    }

    let text = err.message.to_lowercase();
    let duplicate =
        text.contains("duplicate") || text.contains("already exists") || text.contains("unique");
    if err.code == ErrorCode::AlreadyExists || duplicate {
        if text.contains("code") {
            return AppError::with_message(ErrorCode::ProductCodeExists, err.message)
                .with_detail("field", "code");
        }
        if text.contains("name") {
            return AppError::with_message(ErrorCode::ProductNameExists, err.message)
                .with_detail("field", "name");
        }
        return AppError::conflict(err.message);
    }

    AppError::with_message(err.code, format!("save failed: {}", err.message))
}

// ============================================================================
// Admin desk
// ============================================================================

pub struct CatalogAdmin {
    catalog: Arc<dyn CatalogService>,
    spaces: Arc<dyn SpaceService>,
}

impl CatalogAdmin {
    pub fn new(catalog: Arc<dyn CatalogService>, spaces: Arc<dyn SpaceService>) -> Self {
        Self { catalog, spaces }
    }

    /// Creates a product after the client-side gate passes.
    pub async fn create_product(
        &self,
        data: ProductCreate,
        snapshot: &CatalogStore,
    ) -> AppResult<Product> {
        validate_new_product(&data, snapshot)?;
        let created = self
            .catalog
            .create_product(data)
            .await
            .map_err(classify_write_error)?;
        tracing::info!(code = %created.code, "product created");
        Ok(created)
    }

    /// Updates a product; no uniqueness gate, backend decides.
    pub async fn update_product(&self, id: &str, data: ProductUpdate) -> AppResult<Product> {
        self.catalog
            .update_product(id, data)
            .await
            .map_err(classify_write_error)
    }

    pub async fn create_category(&self, data: CategoryCreate) -> AppResult<Category> {
        validate_category_name(&data.name)?;
        self.catalog
            .create_category(data)
            .await
            .map_err(classify_write_error)
    }

    pub async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Category> {
        if let Some(name) = &data.name {
            validate_category_name(name)?;
        }
        self.catalog
            .update_category(id, data)
            .await
            .map_err(classify_write_error)
    }

    pub async fn create_space(&self, data: SpaceCreate) -> AppResult<Space> {
        validate_space_fields(&data.code, &data.name)?;
        self.spaces
            .create_space(data)
            .await
            .map_err(classify_write_error)
    }

    pub async fn update_space(&self, id: &str, data: SpaceUpdate) -> AppResult<Space> {
        if let Some(code) = &data.code
            && code.trim().is_empty()
        {
            return Err(field_error(ErrorCode::RequiredField, "code", "Space code is required"));
        }
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(field_error(ErrorCode::RequiredField, "name", "Space name is required"));
        }
        self.spaces
            .update_space(id, data)
            .await
            .map_err(classify_write_error)
    }

    /// Persists edits to an existing entry, exhaustively by kind.
    pub async fn save(&self, entry: &CatalogEntry) -> AppResult<CatalogEntry> {
        let id = entry
            .id()
            .ok_or_else(|| AppError::validation("entry has not been persisted yet"))?;

        match entry {
            CatalogEntry::Product(p) => {
                let update = ProductUpdate {
                    code: Some(p.code.clone()),
                    name: Some(p.name.clone()),
                    category_id: Some(p.category_id.clone()),
                    price: Some(p.price),
                    kind: Some(p.kind),
                    description: p.description.clone(),
                    preparation_time: Some(p.preparation_time),
                    is_enabled: Some(p.is_enabled),
                    is_available: Some(p.is_available),
                };
                Ok(CatalogEntry::Product(self.update_product(id, update).await?))
            }
            CatalogEntry::Category(c) => {
                let update = CategoryUpdate {
                    name: Some(c.name.clone()),
                    ord: Some(c.ord),
                    is_active: Some(c.is_active),
                };
                Ok(CatalogEntry::Category(
                    self.update_category(id, update).await?,
                ))
            }
            CatalogEntry::Space(s) => {
                let update = SpaceUpdate {
                    code: Some(s.code.clone()),
                    name: Some(s.name.clone()),
                    kind: Some(s.kind),
                    capacity: Some(s.capacity),
                    status: Some(s.status),
                    is_active: Some(s.is_active),
                };
                Ok(CatalogEntry::Space(self.update_space(id, update).await?))
            }
        }
    }

    /// Deletes an entry, exhaustively by kind.
    pub async fn delete(&self, entry: &CatalogEntry) -> AppResult<()> {
        let id = entry
            .id()
            .ok_or_else(|| AppError::validation("entry has not been persisted yet"))?;

        let result = match entry {
            CatalogEntry::Product(_) => self.catalog.delete_product(id).await,
            CatalogEntry::Category(_) => self.catalog.delete_category(id).await,
            CatalogEntry::Space(_) => self.spaces.delete_space(id).await,
        };
        if result.is_ok() {
            tracing::info!(kind = entry.kind_label(), id = %id, "catalog entry deleted");
        }
        result
    }
}
