//! Typed API surfaces over the HTTP transport
//!
//! Each handle wraps a token-carrying transport clone, so handles stay
//! usable after the client value that produced them moves.

mod catalog;
mod orders;
mod spaces;

pub use catalog::CatalogApi;
pub use orders::OrderApi;
pub use spaces::SpaceApi;
