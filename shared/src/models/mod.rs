//! Domain models shared between the POS core, the client and test backends

pub mod category;
pub mod order;
pub mod product;
pub mod space;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use order::{
    decode_legacy_selections, ComboSelection, Order, OrderCreate, OrderItem, OrderStatus,
    OrderUpdateStatus,
};
pub use product::{Product, ProductCreate, ProductKind, ProductUpdate, DEFAULT_PREPARATION_TIME};
pub use space::{Space, SpaceCreate, SpaceKind, SpaceStatus, SpaceUpdate, SpaceUpdateStatus};
