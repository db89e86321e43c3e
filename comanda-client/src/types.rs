//! Type markers for PosClient's typestate pattern.
//!
//! This module defines the state markers used to enforce correct usage of
//! PosClient at compile time.

use std::marker::PhantomData;

// ============================================================================
// State Markers
// ============================================================================

/// Disconnected state - client is created but not connected.
///
/// Available transitions:
/// - `connect()` -> Connected
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

/// Connected state - client reached the backend but is not authenticated.
///
/// Available transitions:
/// - `login()` -> Authenticated
/// - `disconnect()` -> Disconnected
#[derive(Debug, Clone, Copy)]
pub struct Connected;

/// Authenticated state - client is connected and logged in.
///
/// Available operations:
/// - `catalog()`, `orders()`, `spaces()`, `me()`, `logout()`, `disconnect()`
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

/// Sealed trait for client states.
pub trait ClientState: private_state::Sealed + Send + Sync + 'static {}
impl ClientState for Disconnected {}
impl ClientState for Connected {}
impl ClientState for Authenticated {}

mod private_state {
    pub trait Sealed {}
    impl Sealed for super::Disconnected {}
    impl Sealed for super::Connected {}
    impl Sealed for super::Authenticated {}
}

// ============================================================================
// Client Status
// ============================================================================

/// Runtime status information for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientStatus {
    /// Whether the client has confirmed the backend is reachable.
    pub is_connected: bool,
    /// Whether the client is authenticated (has a session token).
    pub is_authenticated: bool,
}

// ============================================================================
// Session Data
// ============================================================================

/// Session data stored in memory during the client's lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Bearer token for HTTP API authentication.
    pub token: Option<String>,
    /// Current user information after login.
    pub user_info: Option<shared::client::UserInfo>,
}

impl SessionData {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token and user info after successful login.
    pub fn set_login(&mut self, token: String, user: shared::client::UserInfo) {
        self.token = Some(token);
        self.user_info = Some(user);
    }

    /// Clears the session data on logout.
    pub fn clear(&mut self) {
        self.token = None;
        self.user_info = None;
    }

    /// Returns the session token if available.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the current user info if available.
    pub fn user(&self) -> Option<&shared::client::UserInfo> {
        self.user_info.as_ref()
    }
}

// ============================================================================
// Phantom State Wrapper
// ============================================================================

/// Internal wrapper to hold the phantom state marker.
#[derive(Debug)]
pub(crate) struct StateMarker<S> {
    pub(crate) _state: PhantomData<S>,
}

impl<S> StateMarker<S> {
    pub(crate) fn new() -> Self {
        Self { _state: PhantomData }
    }
}

impl<S> Clone for StateMarker<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> Default for StateMarker<S> {
    fn default() -> Self {
        Self::new()
    }
}
