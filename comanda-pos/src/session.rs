//! Session context - explicit login state for the POS
//!
//! Owns who is logged in, persists the session across restarts and
//! tears it down on logout. Network authentication goes through the
//! [`AuthService`] seam; the HTTP implementation here drives the
//! typestate client, swapping it between its Connected and
//! Authenticated forms inside a slot.

use crate::service::{AuthService, map_client_error};
use comanda_client::api::{CatalogApi, OrderApi, SpaceApi};
use comanda_client::{Authenticated, CachedSession, Connected, PosClient, SessionStore, UserInfo};
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// HTTP gateway over the typestate client
// ============================================================================

/// The client in whichever state it currently holds.
#[derive(Debug)]
enum ClientSlot {
    Connected(PosClient<Connected>),
    Authenticated(PosClient<Authenticated>),
}

/// Drives the typestate client behind the [`AuthService`] seam.
///
/// Login and logout consume the client value, so it lives in a slot
/// that is taken, transitioned and put back under a write lock.
#[derive(Debug)]
pub struct ClientGateway {
    slot: RwLock<Option<ClientSlot>>,
}

impl ClientGateway {
    /// Wraps a client that already passed the health check.
    pub fn new(client: PosClient<Connected>) -> Self {
        Self {
            slot: RwLock::new(Some(ClientSlot::Connected(client))),
        }
    }

    /// Typed catalog handle; requires an authenticated client.
    pub async fn catalog_api(&self) -> AppResult<CatalogApi> {
        match &*self.slot.read().await {
            Some(ClientSlot::Authenticated(client)) => Ok(client.catalog()),
            _ => Err(AppError::not_authenticated()),
        }
    }

    /// Typed order handle; requires an authenticated client.
    pub async fn order_api(&self) -> AppResult<OrderApi> {
        match &*self.slot.read().await {
            Some(ClientSlot::Authenticated(client)) => Ok(client.orders()),
            _ => Err(AppError::not_authenticated()),
        }
    }

    /// Typed space handle; requires an authenticated client.
    pub async fn space_api(&self) -> AppResult<SpaceApi> {
        match &*self.slot.read().await {
            Some(ClientSlot::Authenticated(client)) => Ok(client.spaces()),
            _ => Err(AppError::not_authenticated()),
        }
    }
}

#[async_trait::async_trait]
impl AuthService for ClientGateway {
    async fn login(&self, username: &str, password: &str) -> AppResult<shared::client::LoginResponse> {
        let mut slot = self.slot.write().await;

        let connected = match slot.take() {
            Some(ClientSlot::Connected(client)) => client,
            // Re-login replaces the current session.
            Some(ClientSlot::Authenticated(client)) => client.logout().await,
            None => return Err(AppError::internal("client not initialized")),
        };

        match connected.login(username, password).await {
            Ok(authenticated) => {
                let user = authenticated
                    .user()
                    .cloned()
                    .ok_or_else(|| AppError::internal("no user info after login"))?;
                let token = authenticated.token().unwrap_or_default().to_string();
                *slot = Some(ClientSlot::Authenticated(authenticated));
                Ok(shared::client::LoginResponse { token, user })
            }
            Err((err, connected)) => {
                // Failed login keeps the connected client for retry.
                *slot = Some(ClientSlot::Connected(connected));
                Err(map_client_error(err))
            }
        }
    }

    async fn resume(&self, token: &str, user: &UserInfo) -> AppResult<()> {
        let mut slot = self.slot.write().await;
        match slot.take() {
            Some(ClientSlot::Connected(client)) => {
                *slot = Some(ClientSlot::Authenticated(
                    client.resume(token.to_string(), user.clone()),
                ));
                Ok(())
            }
            Some(ClientSlot::Authenticated(client)) => {
                *slot = Some(ClientSlot::Authenticated(client));
                Ok(())
            }
            None => Err(AppError::internal("client not initialized")),
        }
    }

    async fn logout(&self) -> AppResult<()> {
        let mut slot = self.slot.write().await;
        match slot.take() {
            Some(ClientSlot::Authenticated(client)) => {
                *slot = Some(ClientSlot::Connected(client.logout().await));
            }
            other => *slot = other,
        }
        Ok(())
    }
}

// ============================================================================
// Session context
// ============================================================================

/// The active login, shared across the desks.
///
/// Holds the current user in memory, mirrors it to the session cache on
/// disk and clears both on logout. Restore runs once at startup.
pub struct SessionContext {
    auth: Arc<dyn AuthService>,
    store: SessionStore,
    current: RwLock<Option<UserInfo>>,
}

impl SessionContext {
    pub fn new(auth: Arc<dyn AuthService>, store: SessionStore) -> Self {
        Self {
            auth,
            store,
            current: RwLock::new(None),
        }
    }

    /// Attempts to resume a persisted session.
    ///
    /// Returns the restored user, or None when nothing valid is cached.
    /// Cache problems are logged and treated as "no session"; they never
    /// block startup.
    pub async fn restore(&self) -> AppResult<Option<UserInfo>> {
        let cached = match self.store.load() {
            Ok(Some(cached)) => cached,
            Ok(None) => return Ok(None),
            Err(err) => {
                tracing::warn!(error = %err, "session cache unreadable, starting logged out");
                return Ok(None);
            }
        };

        self.auth.resume(&cached.token, &cached.user_info).await?;
        *self.current.write().await = Some(cached.user_info.clone());
        tracing::info!(username = %cached.username, "session restored from cache");
        Ok(Some(cached.user_info))
    }

    /// Logs in and persists the session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<UserInfo> {
        let login = self.auth.login(username, password).await?;

        let session = CachedSession::new(login.token, login.user.clone());
        if let Err(err) = self.store.save(&session) {
            // A failed save costs the user a re-login after restart, nothing more.
            tracing::warn!(error = %err, "failed to persist session");
        }

        *self.current.write().await = Some(login.user.clone());
        tracing::info!(username = %login.user.username, role = %login.user.role, "staff session started");
        Ok(login.user)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn current_user(&self) -> Option<UserInfo> {
        self.current.read().await.clone()
    }

    /// Whether the current user may mutate the catalog.
    pub async fn is_admin(&self) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .is_some_and(UserInfo::is_admin)
    }

    /// Ends the session: backend best-effort, memory and disk cleared.
    pub async fn logout(&self) -> AppResult<()> {
        if let Err(err) = self.auth.logout().await {
            tracing::warn!(error = %err, "backend logout failed, clearing local session anyway");
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear session cache");
        }
        *self.current.write().await = None;
        tracing::info!("staff session ended");
        Ok(())
    }
}
