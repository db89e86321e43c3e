//! Comanda Client - typestate HTTP client for the Comanda backend
//!
//! Connection and authentication are encoded in the type system:
//! `PosClient<Disconnected>` can only connect, `PosClient<Connected>`
//! can only log in or resume a cached session, and only
//! `PosClient<Authenticated>` exposes the typed API handles.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session_cache;
pub mod types;

mod client;

pub use api::{CatalogApi, OrderApi, SpaceApi};
pub use client::{PosClient, PosClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session_cache::{CachedSession, SessionCacheError, SessionStore};
pub use types::{Authenticated, ClientState, ClientStatus, Connected, Disconnected};

// Re-export shared types for convenience
pub use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse, UserInfo};
