// comanda-pos/examples/pos_walkthrough.rs
// A full shift against the in-memory backend: log in, take an order,
// walk it through the kitchen and read the board.

use comanda_client::SessionStore;
use comanda_pos::{
    BoardQuery, Cart, CatalogStore, CheckoutDraft, MemoryBackend, OrderAction, OrderDesk,
    OrderSort, SessionContext, StatusFilter,
};
use shared::models::OrderStatus;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let backend = Arc::new(MemoryBackend::with_demo_data());
    let data_dir = tempfile::tempdir()?;

    // Log in as a waiter
    let session = SessionContext::new(backend.clone(), SessionStore::new(data_dir.path()));
    let user = session.login("luis", "1234").await?;
    tracing::info!(username = %user.username, role = %user.role, "logged in");

    // Load the catalog
    let mut catalog = CatalogStore::new();
    catalog.refresh(backend.as_ref(), backend.as_ref()).await?;
    for category in catalog.active_categories() {
        let products = catalog.available_products(category.id.as_deref().unwrap_or_default());
        tracing::info!(category = %category.name, products = products.len(), "menu section");
    }

    // Compose a cart for table M-01
    let tortilla = catalog
        .product_by_code("TOR-01")
        .ok_or("tortilla missing from demo menu")?
        .clone();
    let cana = catalog
        .product_by_code("CER-01")
        .ok_or("caña missing from demo menu")?
        .clone();

    let mut cart = Cart::new();
    cart.add(&tortilla);
    cart.add(&cana);
    cart.add(&cana);
    tracing::info!(items = cart.item_count(), total = cart.total(), "cart ready");

    let draft = CheckoutDraft {
        space_id: Some("space:m1".to_string()),
        customer_name: "Carmen".to_string(),
        ..Default::default()
    };

    // Submit and walk the order through the kitchen
    let mut desk = OrderDesk::new(backend.clone());
    let order = desk.submit(&draft, &mut cart, &catalog).await?;
    let order_id = order.id.clone().unwrap_or_default();
    tracing::info!(number = %order.order_number, total = order.total_amount, "order placed");

    for action in [
        OrderAction::StartPreparation,
        OrderAction::MarkReady,
        OrderAction::MarkDelivered,
    ] {
        let updated = desk.apply(&order_id, action).await?;
        tracing::info!(status = updated.status.label(), "order moved");
    }

    // Read the board
    let delivered = BoardQuery {
        status: StatusFilter::Only(OrderStatus::Entregado),
        sort: OrderSort::Total,
        ..Default::default()
    };
    for row in desk.board(&delivered) {
        tracing::info!(
            number = %row.order_number,
            customer = row.customer_name.as_deref().unwrap_or("-"),
            total = row.total_amount,
            "delivered"
        );
    }
    let stats = desk.stats();
    tracing::info!(
        total = stats.total,
        active = stats.active,
        revenue = stats.revenue,
        "end of shift"
    );

    session.logout().await?;
    tracing::info!("logged out");
    Ok(())
}
