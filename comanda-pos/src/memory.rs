//! In-memory backend - a self-contained double for tests and demos
//!
//! Implements every service trait over `Mutex`-guarded collections and
//! enforces the rules the real backend owns: credential checks, status
//! legality, the delete policy, uniqueness on create and the id /
//! order-number / timestamp assignments.

use crate::service::{AuthService, CatalogService, OrderService, SpaceService};
use async_trait::async_trait;
use shared::client::{LoginResponse, UserInfo};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Order, OrderCreate, OrderStatus, Product,
    ProductCreate, ProductUpdate, Space, SpaceCreate, SpaceKind, SpaceStatus, SpaceUpdate,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct SeededUser {
    password: String,
    info: UserInfo,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<Product>>,
    spaces: Mutex<Vec<Space>>,
    orders: Mutex<Vec<Order>>,
    users: Mutex<HashMap<String, SeededUser>>,
    order_seq: AtomicU32,
}

/// A poisoned lock only means a test panicked mid-write; the data is
/// still usable for the remaining assertions.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-loaded with a small Spanish menu, a few tables and
    /// two staff accounts (`ana`/`secret` admin, `luis`/`1234` waiter).
    pub fn with_demo_data() -> Self {
        let backend = Self::new();

        backend.seed_user("ana", "secret", "admin");
        backend.seed_user("luis", "1234", "waiter");

        for (id, name, ord) in [
            ("category:bebidas", "Bebidas", 1),
            ("category:comidas", "Comidas", 2),
            ("category:postres", "Postres", 3),
        ] {
            backend.seed_category(Category {
                id: Some(id.to_string()),
                name: name.to_string(),
                ord,
                is_active: true,
            });
        }

        use shared::models::ProductKind::*;
        for (id, code, name, category, price, kind) in [
            ("product:cafe", "CAF-01", "Café solo", "category:bebidas", 1.4, Bebida),
            ("product:cana", "CER-01", "Caña", "category:bebidas", 2.0, Bebida),
            ("product:tortilla", "TOR-01", "Tortilla española", "category:comidas", 8.5, Comida),
            ("product:bravas", "BRA-01", "Patatas bravas", "category:comidas", 5.5, Comida),
            ("product:flan", "FLA-01", "Flan casero", "category:postres", 3.9, Postre),
        ] {
            backend.seed_product(Product {
                id: Some(id.to_string()),
                code: code.to_string(),
                name: name.to_string(),
                category_id: category.to_string(),
                price,
                kind,
                description: None,
                preparation_time: 15,
                is_enabled: true,
                is_available: true,
            });
        }

        for (id, code, name, kind, capacity) in [
            ("space:m1", "M-01", "Mesa 1", SpaceKind::Mesa, 4),
            ("space:m2", "M-02", "Mesa 2", SpaceKind::Mesa, 2),
            ("space:m3", "M-03", "Mesa 3", SpaceKind::Mesa, 6),
            ("space:b1", "B-01", "Barra 1", SpaceKind::Barra, 1),
            ("space:d1", "D-01", "Delivery", SpaceKind::Delivery, 1),
        ] {
            backend.seed_space(Space {
                id: Some(id.to_string()),
                code: code.to_string(),
                name: name.to_string(),
                kind,
                capacity,
                status: SpaceStatus::Libre,
                is_active: true,
            });
        }

        backend
    }

    // ------------------------------------------------------------------
    // Seeding (inserted as given, ids kept)
    // ------------------------------------------------------------------

    pub fn seed_user(&self, username: &str, password: &str, role: &str) {
        lock(&self.users).insert(
            username.to_string(),
            SeededUser {
                password: password.to_string(),
                info: UserInfo {
                    id: format!("user:{}", username),
                    username: username.to_string(),
                    role: role.to_string(),
                    permissions: vec![],
                },
            },
        );
    }

    pub fn seed_category(&self, category: Category) {
        lock(&self.categories).push(category);
    }

    pub fn seed_product(&self, product: Product) {
        lock(&self.products).push(product);
    }

    pub fn seed_space(&self, space: Space) {
        lock(&self.spaces).push(space);
    }

    // ------------------------------------------------------------------
    // Snapshots for assertions
    // ------------------------------------------------------------------

    pub fn snapshot_categories(&self) -> Vec<Category> {
        lock(&self.categories).clone()
    }

    pub fn snapshot_products(&self) -> Vec<Product> {
        lock(&self.products).clone()
    }

    pub fn snapshot_spaces(&self) -> Vec<Space> {
        lock(&self.spaces).clone()
    }

    pub fn snapshot_orders(&self) -> Vec<Order> {
        lock(&self.orders).clone()
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let users = lock(&self.users);
        let user = users
            .get(username)
            .filter(|u| u.password == password)
            .ok_or_else(AppError::invalid_credentials)?;
        Ok(LoginResponse {
            token: format!("mem-token-{}", Uuid::new_v4()),
            user: user.info.clone(),
        })
    }

    async fn resume(&self, _token: &str, user: &UserInfo) -> AppResult<()> {
        // Tokens are not tracked; a real backend rejects stale ones on
        // the next request.
        if lock(&self.users).contains_key(&user.username) {
            Ok(())
        } else {
            Err(AppError::session_expired())
        }
    }

    async fn logout(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CatalogService for MemoryBackend {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(lock(&self.categories).clone())
    }

    async fn create_category(&self, data: CategoryCreate) -> AppResult<Category> {
        let category = Category {
            id: Some(format!("category:{}", Uuid::new_v4())),
            name: data.name,
            ord: data.ord.unwrap_or(0),
            is_active: data.is_active.unwrap_or(true),
        };
        lock(&self.categories).push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Category> {
        let mut categories = lock(&self.categories);
        let category = categories
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(ord) = data.ord {
            category.ord = ord;
        }
        if let Some(is_active) = data.is_active {
            category.is_active = is_active;
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        if lock(&self.products).iter().any(|p| p.category_id == id) {
            return Err(AppError::new(ErrorCode::CategoryHasProducts));
        }
        let mut categories = lock(&self.categories);
        let before = categories.len();
        categories.retain(|c| c.id.as_deref() != Some(id));
        if categories.len() == before {
            return Err(AppError::new(ErrorCode::CategoryNotFound));
        }
        Ok(())
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(lock(&self.products).clone())
    }

    async fn create_product(&self, data: ProductCreate) -> AppResult<Product> {
        if !lock(&self.categories)
            .iter()
            .any(|c| c.id.as_deref() == Some(data.category_id.as_str()))
        {
            return Err(AppError::new(ErrorCode::CategoryNotFound));
        }
        if !data.price.is_finite() || data.price <= 0.0 {
            return Err(AppError::new(ErrorCode::ProductInvalidPrice));
        }

        let mut products = lock(&self.products);
        let code_folded = data.code.to_lowercase();
        if products.iter().any(|p| p.code.to_lowercase() == code_folded) {
            return Err(AppError::new(ErrorCode::ProductCodeExists));
        }
        let name_folded = data.name.to_lowercase();
        if products
            .iter()
            .any(|p| p.category_id == data.category_id && p.name.to_lowercase() == name_folded)
        {
            return Err(AppError::new(ErrorCode::ProductNameExists));
        }

        let product = Product {
            id: Some(format!("product:{}", Uuid::new_v4())),
            code: data.code,
            name: data.name,
            category_id: data.category_id,
            price: data.price,
            kind: data.kind,
            description: data.description,
            preparation_time: data
                .preparation_time
                .unwrap_or(shared::models::DEFAULT_PREPARATION_TIME),
            is_enabled: data.is_enabled.unwrap_or(true),
            is_available: data.is_available.unwrap_or(true),
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &str, data: ProductUpdate) -> AppResult<Product> {
        let mut products = lock(&self.products);
        let product = products
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
        if let Some(code) = data.code {
            product.code = code;
        }
        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(category_id) = data.category_id {
            product.category_id = category_id;
        }
        if let Some(price) = data.price {
            if !price.is_finite() || price <= 0.0 {
                return Err(AppError::new(ErrorCode::ProductInvalidPrice));
            }
            product.price = price;
        }
        if let Some(kind) = data.kind {
            product.kind = kind;
        }
        if let Some(description) = data.description {
            product.description = Some(description);
        }
        if let Some(preparation_time) = data.preparation_time {
            product.preparation_time = preparation_time;
        }
        if let Some(is_enabled) = data.is_enabled {
            product.is_enabled = is_enabled;
        }
        if let Some(is_available) = data.is_available {
            product.is_available = is_available;
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        let mut products = lock(&self.products);
        let before = products.len();
        products.retain(|p| p.id.as_deref() != Some(id));
        if products.len() == before {
            return Err(AppError::new(ErrorCode::ProductNotFound));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderService for MemoryBackend {
    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        Ok(lock(&self.orders).clone())
    }

    async fn create_order(&self, data: OrderCreate) -> AppResult<Order> {
        let space_name = lock(&self.spaces)
            .iter()
            .find(|s| s.id.as_deref() == Some(data.space_id.as_str()))
            .map(|s| s.name.clone())
            .ok_or_else(|| AppError::new(ErrorCode::SpaceNotFound))?;
        if data.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let seq = self.order_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order {
            id: Some(format!("order:{}", Uuid::new_v4())),
            order_number: format!("ORD-{:03}", seq),
            space_id: data.space_id,
            space_name: Some(space_name),
            customer_name: Some(data.customer_name),
            customer_phone: data.customer_phone,
            status: OrderStatus::Pendiente,
            items: data.items,
            total_amount: data.total_amount,
            created_at: shared::util::now_rfc3339(),
            notes: data.notes,
        };
        lock(&self.orders).push(order.clone());
        Ok(order)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let mut orders = lock(&self.orders);
        let order = orders
            .iter_mut()
            .find(|o| o.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
        if !order.status.can_transition_to(status) {
            return Err(AppError::transition(format!(
                "cannot move from {} to {}",
                order.status.label(),
                status.label()
            )));
        }
        order.status = status;
        Ok(order.clone())
    }

    async fn delete_order(&self, id: &str) -> AppResult<()> {
        let mut orders = lock(&self.orders);
        let order = orders
            .iter()
            .find(|o| o.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
        if !order.status.can_delete() {
            return Err(AppError::new(ErrorCode::OrderNotDeletable));
        }
        orders.retain(|o| o.id.as_deref() != Some(id));
        Ok(())
    }
}

#[async_trait]
impl SpaceService for MemoryBackend {
    async fn list_spaces(&self) -> AppResult<Vec<Space>> {
        Ok(lock(&self.spaces).clone())
    }

    async fn create_space(&self, data: SpaceCreate) -> AppResult<Space> {
        let mut spaces = lock(&self.spaces);
        let code_folded = data.code.to_lowercase();
        if spaces.iter().any(|s| s.code.to_lowercase() == code_folded) {
            return Err(AppError::new(ErrorCode::SpaceCodeExists));
        }
        let space = Space {
            id: Some(format!("space:{}", Uuid::new_v4())),
            code: data.code,
            name: data.name,
            kind: data.kind,
            capacity: data.capacity,
            status: data.status.unwrap_or_default(),
            is_active: data.is_active.unwrap_or(true),
        };
        spaces.push(space.clone());
        Ok(space)
    }

    async fn update_space(&self, id: &str, data: SpaceUpdate) -> AppResult<Space> {
        let mut spaces = lock(&self.spaces);
        let space = spaces
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::new(ErrorCode::SpaceNotFound))?;
        if let Some(code) = data.code {
            space.code = code;
        }
        if let Some(name) = data.name {
            space.name = name;
        }
        if let Some(kind) = data.kind {
            space.kind = kind;
        }
        if let Some(capacity) = data.capacity {
            space.capacity = capacity;
        }
        if let Some(status) = data.status {
            space.status = status;
        }
        if let Some(is_active) = data.is_active {
            space.is_active = is_active;
        }
        Ok(space.clone())
    }

    async fn update_space_status(&self, id: &str, status: SpaceStatus) -> AppResult<Space> {
        let mut spaces = lock(&self.spaces);
        let space = spaces
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::new(ErrorCode::SpaceNotFound))?;
        space.status = status;
        Ok(space.clone())
    }

    async fn delete_space(&self, id: &str) -> AppResult<()> {
        let mut spaces = lock(&self.spaces);
        let before = spaces.len();
        spaces.retain(|s| s.id.as_deref() != Some(id));
        if spaces.len() == before {
            return Err(AppError::new(ErrorCode::SpaceNotFound));
        }
        Ok(())
    }
}
