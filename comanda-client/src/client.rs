//! PosClient - typestate client for the Comanda backend
//!
//! The client moves through `Disconnected -> Connected -> Authenticated`
//! and each state only exposes the operations that are valid there, so a
//! call against a logged-out client is a compile error rather than a
//! runtime surprise.

use crate::api::{CatalogApi, OrderApi, SpaceApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;
use crate::types::{
    Authenticated, ClientState, ClientStatus, Connected, Disconnected, SessionData, StateMarker,
};
use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse, UserInfo};
use shared::error::ApiResponse;

/// A type-safe HTTP client for the Comanda backend.
///
/// # States
///
/// - **Disconnected**: initial state. `connect()` pings the backend.
/// - **Connected**: backend reachable but no session. `login()` or `resume()`.
/// - **Authenticated**: logged in; exposes the typed API handles.
///
/// # Example
///
/// ```no_run
/// use comanda_client::PosClient;
///
/// # async fn example() -> Result<(), comanda_client::ClientError> {
/// let client = PosClient::builder()
///     .base_url("http://localhost:8080")
///     .build()?;
///
/// let client = client.connect().await?;
/// let client = match client.login("ana", "secret").await {
///     Ok(client) => client,
///     Err((err, _client)) => return Err(err),
/// };
///
/// let orders = client.orders().list().await?;
/// # let _ = orders;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PosClient<S: ClientState = Disconnected> {
    #[allow(dead_code)] // Used for typestate pattern at compile time
    pub(crate) marker: StateMarker<S>,
    pub(crate) http: HttpTransport,
    pub(crate) session: SessionData,
    pub(crate) config: ClientConfig,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`PosClient`]
#[derive(Debug, Default)]
pub struct PosClientBuilder {
    base_url: Option<String>,
    timeout: Option<u64>,
}

impl PosClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend base URL (e.g., "http://localhost:8080")
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Request timeout in seconds (default 30)
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn build(self) -> ClientResult<PosClient<Disconnected>> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Config("base_url is required".into()))?;
        let mut config = ClientConfig::new(base_url);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        PosClient::new(config)
    }
}

impl PosClient<Disconnected> {
    /// Creates a builder for a client.
    pub fn builder() -> PosClientBuilder {
        PosClientBuilder::new()
    }

    /// Creates a disconnected client from a configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = HttpTransport::new(&config.base_url, config.timeout)?;
        Ok(Self {
            marker: StateMarker::new(),
            http,
            session: SessionData::new(),
            config,
        })
    }

    /// Verifies the backend is reachable and moves to Connected.
    pub async fn connect(self) -> Result<PosClient<Connected>, ClientError> {
        self.http.ping().await?;
        tracing::info!(base_url = %self.config.base_url, "connected to backend");
        Ok(self.transition())
    }

    /// Returns the client status.
    pub fn status(&self) -> ClientStatus {
        ClientStatus {
            is_connected: false,
            is_authenticated: false,
        }
    }
}

// ============================================================================
// Common Methods (Available in All States)
// ============================================================================

impl<S: ClientState> PosClient<S> {
    /// Returns the current session token, if available.
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// Checks if the client holds a session token.
    pub fn is_authenticated(&self) -> bool {
        self.session.token.is_some()
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Transforms the client to a new state (internal use only).
    pub(crate) fn transition<NewS: ClientState>(self) -> PosClient<NewS> {
        PosClient {
            marker: StateMarker::new(),
            http: self.http,
            session: self.session,
            config: self.config,
        }
    }
}

// ============================================================================
// Connected State
// ============================================================================

impl PosClient<Connected> {
    /// Logs in with staff credentials.
    ///
    /// # Returns
    /// - `Ok(Authenticated)` on success
    /// - `Err((error, Connected))` on failure, returning the original client
    ///   for retry
    pub async fn login(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<PosClient<Authenticated>, (ClientError, Self)> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        tracing::info!(username = %username, "staff login");

        let response: ApiResponse<LoginResponse> =
            match self.http.post("/api/auth/login", &request).await {
                Ok(r) => r,
                Err(err) => return Err((err, self)),
            };

        let login = match unwrap_envelope(response) {
            Ok(data) => data,
            Err(err) => return Err((err, self)),
        };

        self.session.set_login(login.token.clone(), login.user);
        self.http = self.http.clone().with_token(Some(login.token));

        tracing::info!("staff logged in");
        Ok(self.transition())
    }

    /// Adopts a previously persisted session without a network round trip.
    ///
    /// The backend still rejects stale tokens on the next request; callers
    /// should treat that as a session-expired signal and fall back to login.
    pub fn resume(mut self, token: String, user: UserInfo) -> PosClient<Authenticated> {
        self.session.set_login(token.clone(), user);
        self.http = self.http.clone().with_token(Some(token));
        tracing::info!("session resumed from cache");
        self.transition()
    }

    /// Disconnects from the server.
    pub fn disconnect(mut self) -> PosClient<Disconnected> {
        self.session.clear();
        self.http = self.http.clone().with_token(None);
        tracing::info!("disconnected");
        self.transition()
    }

    /// Returns the client status.
    pub fn status(&self) -> ClientStatus {
        ClientStatus {
            is_connected: true,
            is_authenticated: false,
        }
    }
}

// ============================================================================
// Authenticated State
// ============================================================================

impl PosClient<Authenticated> {
    /// Fetches the current user from the backend.
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        let response: ApiResponse<CurrentUserResponse> = self.http.get("/api/auth/me").await?;
        unwrap_envelope(response)
    }

    /// Returns the locally cached user info from login.
    pub fn user(&self) -> Option<&UserInfo> {
        self.session.user()
    }

    /// Typed catalog API (categories, products, spaces CRUD).
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.http.clone())
    }

    /// Typed order API.
    pub fn orders(&self) -> OrderApi {
        OrderApi::new(self.http.clone())
    }

    /// Typed space API.
    pub fn spaces(&self) -> SpaceApi {
        SpaceApi::new(self.http.clone())
    }

    /// Logs out the staff member.
    ///
    /// The backend call is best-effort; the local session is cleared
    /// regardless.
    pub async fn logout(mut self) -> PosClient<Connected> {
        if let Err(err) = self
            .http
            .post_empty::<ApiResponse<()>>("/api/auth/logout")
            .await
        {
            tracing::warn!(error = %err, "logout request failed");
        }
        self.session.clear();
        self.http = self.http.clone().with_token(None);
        tracing::info!("staff logged out");
        self.transition()
    }

    /// Disconnects from the server and clears the session.
    pub fn disconnect(mut self) -> PosClient<Disconnected> {
        self.session.clear();
        self.http = self.http.clone().with_token(None);
        tracing::info!("disconnected");
        self.transition()
    }

    /// Returns the client status.
    pub fn status(&self) -> ClientStatus {
        ClientStatus {
            is_connected: true,
            is_authenticated: true,
        }
    }
}

/// Unwraps the backend envelope into a ClientResult
fn unwrap_envelope<T>(response: ApiResponse<T>) -> ClientResult<T> {
    response.into_result().map_err(|err| ClientError::Api {
        code: err.code.code(),
        message: err.message,
        details: err.details,
    })
}
