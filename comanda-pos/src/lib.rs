//! Comanda POS - front-of-house core for a restaurant point of sale
//!
//! Everything between the staff-facing surface and the backend: the cart
//! a waiter composes, checkout validation, the order lifecycle desk, the
//! order board with its filters and sorting, the space map and the
//! catalog admin. All state here is a working copy; the backend stays
//! authoritative and every mutation is one request plus a reload.
//!
//! Service access goes through the traits in [`service`]; production
//! wires them to the HTTP client, tests and demos to the in-memory
//! backend in [`memory`].

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod lifecycle;
pub mod memory;
pub mod orders;
pub mod service;
pub mod session;
pub mod spaces;
pub mod view;

pub use admin::{CatalogAdmin, CatalogEntry};
pub use cart::{Cart, CartLine};
pub use catalog::CatalogStore;
pub use checkout::CheckoutDraft;
pub use config::AppConfig;
pub use lifecycle::OrderAction;
pub use memory::MemoryBackend;
pub use orders::OrderDesk;
pub use service::{AuthService, CatalogService, OrderService, SpaceService};
pub use session::{ClientGateway, SessionContext};
pub use spaces::SpaceDesk;
pub use view::{BoardQuery, OrderSort, OrderStats, StatusFilter};

// Re-export the crates callers interact with directly
pub use comanda_client;
pub use shared;
