//! Backend service seams
//!
//! The POS core reaches the backend through these traits, so the same
//! flows run against the HTTP client in production and against the
//! in-memory backend in tests. Transport-level failures are translated
//! into [`AppError`] here; everything above this line speaks one error
//! language.

use async_trait::async_trait;
use comanda_client::api::{CatalogApi, OrderApi, SpaceApi};
use comanda_client::error::ClientError;
use shared::client::{LoginResponse, UserInfo};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Order, OrderCreate, OrderStatus, Product,
    ProductCreate, ProductUpdate, Space, SpaceCreate, SpaceStatus, SpaceUpdate,
};

/// Catalog reads and admin mutations.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn create_category(&self, data: CategoryCreate) -> AppResult<Category>;
    async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Category>;
    async fn delete_category(&self, id: &str) -> AppResult<()>;

    async fn list_products(&self) -> AppResult<Vec<Product>>;
    async fn create_product(&self, data: ProductCreate) -> AppResult<Product>;
    async fn update_product(&self, id: &str, data: ProductUpdate) -> AppResult<Product>;
    async fn delete_product(&self, id: &str) -> AppResult<()>;
}

/// Order lifecycle operations.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list_orders(&self) -> AppResult<Vec<Order>>;
    async fn create_order(&self, data: OrderCreate) -> AppResult<Order>;
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order>;
    async fn delete_order(&self, id: &str) -> AppResult<()>;
}

/// Space management.
#[async_trait]
pub trait SpaceService: Send + Sync {
    async fn list_spaces(&self) -> AppResult<Vec<Space>>;
    async fn create_space(&self, data: SpaceCreate) -> AppResult<Space>;
    async fn update_space(&self, id: &str, data: SpaceUpdate) -> AppResult<Space>;
    async fn update_space_status(&self, id: &str, status: SpaceStatus) -> AppResult<Space>;
    async fn delete_space(&self, id: &str) -> AppResult<()>;
}

/// Authenticated-session provider.
///
/// The HTTP implementation is [`ClientGateway`](crate::session::ClientGateway),
/// which drives the typestate client; the in-memory backend implements
/// the same trait with a seeded user table.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse>;

    /// Adopts a previously issued token without a credential round trip.
    /// The backend still rejects stale tokens on the next request.
    async fn resume(&self, token: &str, user: &UserInfo) -> AppResult<()>;

    /// Best-effort backend logout.
    async fn logout(&self) -> AppResult<()>;
}

/// Translates a transport error into the POS error language.
///
/// Backend errors already carry an error code; those pass through with
/// their message intact. Pure transport failures become network errors
/// so the UI can show a single "backend unreachable" message.
pub fn map_client_error(err: ClientError) -> AppError {
    match err {
        ClientError::Api {
            code,
            message,
            details,
        } => {
            let code = ErrorCode::try_from(code).unwrap_or(ErrorCode::Unknown);
            let mut app_err = AppError::with_message(code, message);
            if let Some(details) = details {
                for (key, value) in details {
                    app_err = app_err.with_detail(key, value);
                }
            }
            app_err
        }
        ClientError::Http(e) => {
            if e.is_timeout() {
                AppError::with_message(ErrorCode::TimeoutError, format!("request timed out: {e}"))
            } else {
                AppError::network(format!("request failed: {e}"))
            }
        }
        ClientError::Connection(msg) => AppError::network(msg),
        ClientError::Unauthorized => AppError::session_expired(),
        ClientError::Forbidden(msg) => AppError::permission_denied(msg),
        ClientError::NotFound(msg) => AppError::not_found(msg),
        ClientError::Validation(msg) => AppError::validation(msg),
        ClientError::Auth(msg) => AppError::with_message(ErrorCode::InvalidCredentials, msg),
        ClientError::InvalidResponse(msg) => {
            AppError::internal(format!("unexpected backend response: {msg}"))
        }
        ClientError::Serialization(e) => {
            AppError::internal(format!("response decode failed: {e}"))
        }
        ClientError::Config(msg) => AppError::with_message(ErrorCode::ConfigError, msg),
        ClientError::Internal(msg) => AppError::internal(msg),
    }
}

// ============================================================================
// HTTP adapters
// ============================================================================

#[async_trait]
impl CatalogService for CatalogApi {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        CatalogApi::list_categories(self).await.map_err(map_client_error)
    }

    async fn create_category(&self, data: CategoryCreate) -> AppResult<Category> {
        CatalogApi::create_category(self, &data)
            .await
            .map_err(map_client_error)
    }

    async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Category> {
        CatalogApi::update_category(self, id, &data)
            .await
            .map_err(map_client_error)
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        CatalogApi::delete_category(self, id)
            .await
            .map_err(map_client_error)
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        CatalogApi::list_products(self).await.map_err(map_client_error)
    }

    async fn create_product(&self, data: ProductCreate) -> AppResult<Product> {
        CatalogApi::create_product(self, &data)
            .await
            .map_err(map_client_error)
    }

    async fn update_product(&self, id: &str, data: ProductUpdate) -> AppResult<Product> {
        CatalogApi::update_product(self, id, &data)
            .await
            .map_err(map_client_error)
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        CatalogApi::delete_product(self, id)
            .await
            .map_err(map_client_error)
    }
}

#[async_trait]
impl OrderService for OrderApi {
    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        OrderApi::list(self).await.map_err(map_client_error)
    }

    async fn create_order(&self, data: OrderCreate) -> AppResult<Order> {
        OrderApi::create(self, &data).await.map_err(map_client_error)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        OrderApi::update_status(self, id, status)
            .await
            .map_err(map_client_error)
    }

    async fn delete_order(&self, id: &str) -> AppResult<()> {
        OrderApi::delete(self, id).await.map_err(map_client_error)
    }
}

#[async_trait]
impl SpaceService for SpaceApi {
    async fn list_spaces(&self) -> AppResult<Vec<Space>> {
        SpaceApi::list(self).await.map_err(map_client_error)
    }

    async fn create_space(&self, data: SpaceCreate) -> AppResult<Space> {
        SpaceApi::create(self, &data).await.map_err(map_client_error)
    }

    async fn update_space(&self, id: &str, data: SpaceUpdate) -> AppResult<Space> {
        SpaceApi::update(self, id, &data)
            .await
            .map_err(map_client_error)
    }

    async fn update_space_status(&self, id: &str, status: SpaceStatus) -> AppResult<Space> {
        SpaceApi::update_status(self, id, status)
            .await
            .map_err(map_client_error)
    }

    async fn delete_space(&self, id: &str) -> AppResult<()> {
        SpaceApi::delete(self, id).await.map_err(map_client_error)
    }
}
