//! End-to-end flows over the in-memory backend
//!
//! Exercises the whole front-of-house path the way a shift would: log
//! in, load the catalog, compose a cart, submit, walk the order through
//! its lifecycle and keep the board aggregates honest along the way.

use comanda_client::SessionStore;
use comanda_pos::service::OrderService;
use comanda_pos::{
    BoardQuery, Cart, CatalogAdmin, CatalogStore, CheckoutDraft, MemoryBackend, OrderAction,
    OrderDesk, OrderSort, SessionContext, StatusFilter,
};
use shared::error::ErrorCode;
use shared::models::{Category, OrderStatus, Product, ProductCreate, ProductKind, Space};
use std::sync::Arc;
use tempfile::TempDir;

fn category(id: &str, name: &str) -> Category {
    Category {
        id: Some(id.to_string()),
        name: name.to_string(),
        ord: 1,
        is_active: true,
    }
}

fn product(id: &str, code: &str, name: &str, category_id: &str, price: f64) -> Product {
    Product {
        id: Some(id.to_string()),
        code: code.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        price,
        kind: ProductKind::Comida,
        description: None,
        preparation_time: 15,
        is_enabled: true,
        is_available: true,
    }
}

fn space(id: &str, code: &str, name: &str) -> Space {
    Space {
        id: Some(id.to_string()),
        code: code.to_string(),
        name: name.to_string(),
        kind: shared::models::SpaceKind::Mesa,
        capacity: 4,
        status: shared::models::SpaceStatus::Libre,
        is_active: true,
    }
}

/// Backend with one category, two priced products and one table.
fn seeded_backend() -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_category(category("category:raciones", "Raciones"));
    backend.seed_product(product(
        "product:racion",
        "RAC-01",
        "Ración grande",
        "category:raciones",
        10.0,
    ));
    backend.seed_product(product(
        "product:tapa",
        "TAP-01",
        "Tapa",
        "category:raciones",
        5.0,
    ));
    backend.seed_space(space("space:m1", "M-01", "Mesa 1"));
    backend
}

async fn loaded_catalog(backend: &MemoryBackend) -> CatalogStore {
    let mut catalog = CatalogStore::new();
    catalog.refresh(backend, backend).await.unwrap();
    catalog
}

#[tokio::test]
async fn test_cart_to_submitted_order_keeps_totals() {
    let backend = seeded_backend();
    let catalog = loaded_catalog(&backend).await;
    let mut desk = OrderDesk::new(backend.clone());

    let racion = catalog.product("product:racion").unwrap().clone();
    let tapa = catalog.product("product:tapa").unwrap().clone();

    let mut cart = Cart::new();
    cart.add(&racion);
    cart.add(&racion);
    cart.add(&tapa);
    assert_eq!(cart.total(), 25.0);

    let draft = CheckoutDraft {
        space_id: Some("space:m1".to_string()),
        customer_name: "Ana".to_string(),
        ..Default::default()
    };

    let order = desk.submit(&draft, &mut cart, &catalog).await.unwrap();
    assert_eq!(order.total_amount, 25.0);
    assert_eq!(order.items.len(), 2);
    let item_sum: f64 = order.items.iter().map(|i| i.total_price).sum();
    assert_eq!(item_sum, 25.0);
    assert_eq!(order.status, OrderStatus::Pendiente);
    assert_eq!(order.space_name.as_deref(), Some("Mesa 1"));

    assert!(cart.is_empty());
    assert_eq!(desk.orders().len(), 1);
}

#[tokio::test]
async fn test_rejected_submission_keeps_cart() {
    let backend = seeded_backend();
    let catalog = loaded_catalog(&backend).await;
    let mut desk = OrderDesk::new(backend.clone());

    let tapa = catalog.product("product:tapa").unwrap().clone();
    let mut cart = Cart::new();
    cart.add(&tapa);

    let draft = CheckoutDraft {
        space_id: Some("space:gone".to_string()),
        customer_name: "Ana".to_string(),
        ..Default::default()
    };

    let err = desk.submit(&draft, &mut cart, &catalog).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SpaceNotFound);
    assert!(!cart.is_empty());
    assert!(desk.orders().is_empty());
}

#[tokio::test]
async fn test_ready_order_rejects_backward_then_delivery_freezes_it() {
    let backend = seeded_backend();
    let catalog = loaded_catalog(&backend).await;
    let mut desk = OrderDesk::new(backend.clone());

    let tapa = catalog.product("product:tapa").unwrap().clone();
    let mut cart = Cart::new();
    cart.add(&tapa);
    let draft = CheckoutDraft {
        space_id: Some("space:m1".to_string()),
        customer_name: "Ana".to_string(),
        ..Default::default()
    };
    let order = desk.submit(&draft, &mut cart, &catalog).await.unwrap();
    let id = order.id.unwrap();

    desk.apply(&id, OrderAction::StartPreparation).await.unwrap();
    desk.apply(&id, OrderAction::MarkReady).await.unwrap();
    assert_eq!(desk.order(&id).unwrap().status, OrderStatus::Listo);

    // Backward move refused by the backend, status untouched
    let err = backend
        .update_order_status(&id, OrderStatus::Pendiente)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TransitionNotAllowed);
    desk.reload().await.unwrap();
    assert_eq!(desk.order(&id).unwrap().status, OrderStatus::Listo);

    desk.apply(&id, OrderAction::MarkDelivered).await.unwrap();
    assert_eq!(desk.order(&id).unwrap().status, OrderStatus::Entregado);

    let err = desk.delete(&id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotDeletable);
    assert!(desk.order(&id).is_some());
}

#[tokio::test]
async fn test_board_queries_never_move_the_aggregates() {
    let backend = seeded_backend();
    let catalog = loaded_catalog(&backend).await;
    let mut desk = OrderDesk::new(backend.clone());

    let racion = catalog.product("product:racion").unwrap().clone();
    let draft = CheckoutDraft {
        space_id: Some("space:m1".to_string()),
        customer_name: "Ana".to_string(),
        ..Default::default()
    };

    // Four orders, walked to four different statuses
    let mut ids = Vec::new();
    for _ in 0..4 {
        let mut cart = Cart::new();
        cart.add(&racion);
        let order = desk.submit(&draft, &mut cart, &catalog).await.unwrap();
        ids.push(order.id.unwrap());
    }
    desk.apply(&ids[1], OrderAction::StartPreparation).await.unwrap();
    desk.apply(&ids[2], OrderAction::StartPreparation).await.unwrap();
    desk.apply(&ids[2], OrderAction::MarkReady).await.unwrap();
    desk.apply(&ids[3], OrderAction::Cancel).await.unwrap();

    let baseline = desk.stats();
    assert_eq!(baseline.total, 4);
    assert_eq!(baseline.active, 2);
    assert_eq!(baseline.revenue, 40.0);

    let filters = [
        StatusFilter::All,
        StatusFilter::Only(OrderStatus::Pendiente),
        StatusFilter::Only(OrderStatus::Listo),
        StatusFilter::Only(OrderStatus::Cancelado),
    ];
    let sorts = [OrderSort::Recency, OrderSort::StatusLabel, OrderSort::Total];
    for status in filters {
        for sort in sorts {
            let query = BoardQuery {
                text: String::new(),
                status,
                sort,
            };
            let rows = desk.board(&query);
            assert!(rows.len() <= baseline.total);
            assert_eq!(desk.stats(), baseline);
        }
    }

    // A narrowing filter narrows the rows, not the headline numbers
    let only_ready = BoardQuery {
        status: StatusFilter::Only(OrderStatus::Listo),
        ..Default::default()
    };
    assert_eq!(desk.board(&only_ready).len(), 1);
    assert_eq!(desk.stats(), baseline);
}

#[tokio::test]
async fn test_duplicate_product_rules_across_categories() {
    let backend = seeded_backend();
    backend.seed_category(category("category:bebidas", "Bebidas"));
    let admin = CatalogAdmin::new(backend.clone(), backend.clone());
    let mut catalog = loaded_catalog(&backend).await;

    let soda = |code: &str, category_id: &str| ProductCreate {
        code: code.to_string(),
        name: "Soda".to_string(),
        category_id: category_id.to_string(),
        price: 2.0,
        kind: ProductKind::Bebida,
        description: None,
        preparation_time: None,
        is_enabled: None,
        is_available: None,
    };

    admin
        .create_product(soda("SOD-01", "category:raciones"), &catalog)
        .await
        .unwrap();
    catalog.refresh(backend.as_ref(), backend.as_ref()).await.unwrap();
    let count = backend.snapshot_products().len();

    // Same code, different case: rejected, catalog untouched
    let err = admin
        .create_product(soda("sod-01", "category:bebidas"), &catalog)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductCodeExists);
    assert_eq!(backend.snapshot_products().len(), count);

    // Same name in the same category: rejected
    let err = admin
        .create_product(soda("SOD-02", "category:raciones"), &catalog)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNameExists);
    assert_eq!(backend.snapshot_products().len(), count);

    // Same name in another category: fine
    admin
        .create_product(soda("SOD-02", "category:bebidas"), &catalog)
        .await
        .unwrap();
    assert_eq!(backend.snapshot_products().len(), count + 1);

    // Accented names fold across case as well: the seeded product is
    // "Ración grande"
    let racion = ProductCreate {
        name: "RACIÓN GRANDE".to_string(),
        ..soda("RAC-99", "category:raciones")
    };
    let err = admin.create_product(racion, &catalog).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNameExists);
    assert_eq!(backend.snapshot_products().len(), count + 1);
}

#[tokio::test]
async fn test_session_survives_restart_until_logout() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(MemoryBackend::with_demo_data());

    let session = SessionContext::new(backend.clone(), SessionStore::new(dir.path()));
    let user = session.login("ana", "secret").await.unwrap();
    assert!(user.is_admin());
    assert!(session.is_authenticated().await);
    assert!(session.is_admin().await);

    // A fresh context over the same directory picks the session back up
    let restarted = SessionContext::new(backend.clone(), SessionStore::new(dir.path()));
    let restored = restarted.restore().await.unwrap();
    assert_eq!(restored.map(|u| u.username).as_deref(), Some("ana"));
    assert!(restarted.is_authenticated().await);

    restarted.logout().await.unwrap();
    assert!(!restarted.is_authenticated().await);

    // Disk is clean too
    let after = SessionContext::new(backend.clone(), SessionStore::new(dir.path()));
    assert!(after.restore().await.unwrap().is_none());
    assert!(!after.is_authenticated().await);
}

#[tokio::test]
async fn test_waiter_is_not_admin() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(MemoryBackend::with_demo_data());

    let session = SessionContext::new(backend.clone(), SessionStore::new(dir.path()));
    session.login("luis", "1234").await.unwrap();
    assert!(session.is_authenticated().await);
    assert!(!session.is_admin().await);

    let err = session.login("luis", "wrong").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}
