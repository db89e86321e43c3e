//! Shared types for the Comanda POS front end
//!
//! Wire models, the unified error system, auth DTOs and small money/time
//! utilities used by the service client and the POS core.

pub mod client;
pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{Category, Order, OrderStatus, Product, Space};
