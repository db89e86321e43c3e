//! Session cache - persists the active session across app restarts
//!
//! The session is a JSON file on disk. Loading checks the token expiry
//! (taken from the JWT `exp` claim at save time) and silently discards a
//! stale file, so callers only ever see sessions worth resuming.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SESSION_FILE: &str = "current_session.json";

#[derive(Debug, Error)]
pub enum SessionCacheError {
    #[error("session cache io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session cache serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSession {
    pub username: String,
    pub token: String,
    pub user_info: UserInfo,
    /// Unix seconds taken from the JWT `exp` claim; None if the token
    /// carries no expiry
    pub expires_at: Option<u64>,
    /// Unix seconds at save time
    pub logged_in_at: u64,
}

impl CachedSession {
    pub fn new(token: String, user_info: UserInfo) -> Self {
        let expires_at = parse_jwt_exp(&token);
        Self {
            username: user_info.username.clone(),
            token,
            user_info,
            expires_at,
            logged_in_at: now_secs(),
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        match self.expires_at {
            Some(exp) => exp <= now,
            None => false,
        }
    }
}

/// Extracts the `exp` claim (unix seconds) from a JWT without verifying
/// the signature. Verification is the backend's job; the client only
/// needs the expiry to avoid resuming a dead session.
pub fn parse_jwt_exp(token: &str) -> Option<u64> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    claims.get("exp")?.as_u64()
}

fn now_secs() -> u64 {
    (shared::util::now_millis() / 1000).max(0) as u64
}

/// File-backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            file_path: data_dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Persists the session, replacing any previous one.
    pub fn save(&self, session: &CachedSession) -> Result<(), SessionCacheError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.file_path, json)?;
        tracing::debug!(username = %session.username, "session saved");
        Ok(())
    }

    /// Loads the persisted session, if one exists and is still valid.
    ///
    /// An expired session is removed from disk and reported as absent.
    pub fn load(&self) -> Result<Option<CachedSession>, SessionCacheError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.file_path)?;
        let session: CachedSession = match serde_json::from_str(&json) {
            Ok(s) => s,
            Err(err) => {
                // Unreadable cache files are discarded, not surfaced.
                tracing::warn!(error = %err, "session cache unreadable, clearing");
                fs::remove_file(&self.file_path)?;
                return Ok(None);
            }
        };

        if session.is_expired(now_secs()) {
            tracing::info!(username = %session.username, "cached session expired, clearing");
            fs::remove_file(&self.file_path)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Removes the persisted session, if any.
    pub fn clear(&self) -> Result<(), SessionCacheError> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
            tracing::debug!("session cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> UserInfo {
        UserInfo {
            id: "user:ana".to_string(),
            username: "ana".to_string(),
            role: "waiter".to_string(),
            permissions: vec![],
        }
    }

    /// Builds an unsigned JWT-shaped token with the given claims payload.
    fn fake_jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn test_parse_jwt_exp() {
        let token = fake_jwt(serde_json::json!({"sub": "ana", "exp": 9999999999u64}));
        assert_eq!(parse_jwt_exp(&token), Some(9999999999));

        let no_exp = fake_jwt(serde_json::json!({"sub": "ana"}));
        assert_eq!(parse_jwt_exp(&no_exp), None);

        assert_eq!(parse_jwt_exp("not-a-jwt"), None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let token = fake_jwt(serde_json::json!({"exp": 9999999999u64}));
        let session = CachedSession::new(token, test_user());
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.username, "ana");
        assert_eq!(loaded.expires_at, Some(9999999999));
        assert_eq!(loaded.user_info.role, "waiter");
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        // exp=1 is far in the past
        let token = fake_jwt(serde_json::json!({"exp": 1u64}));
        let session = CachedSession::new(token, test_user());
        store.save(&session).unwrap();

        assert!(store.load().unwrap().is_none());
        // the stale file is gone too
        assert!(store.load().unwrap().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.clear().unwrap();

        let token = fake_jwt(serde_json::json!({"exp": 9999999999u64}));
        store.save(&CachedSession::new(token, test_user())).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_cache_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }
}
