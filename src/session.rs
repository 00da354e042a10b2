//! Persisted credentials: a small key/value store backed by a JSON file.
//!
//! Two keys matter: `access_token` holds the bearer token and `user` holds the
//! signed-in user's profile as a JSON string. Only a profile whose role is
//! `admin` counts as an authenticated dashboard session.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("session encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// An admin user together with the token that authenticates them.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug)]
struct Inner {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

/// Cloneable, internally synchronised handle; every clone sees the same items.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    /// Loads the store from `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "discarding unreadable session file");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read session file");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), keys = items.len(), "session store opened");
        Self::from_parts(Some(path), items)
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::from_parts(None, BTreeMap::new())
    }

    fn from_parts(path: Option<PathBuf>, items: BTreeMap<String, String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { path, items })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.lock().items.get(key).cloned()
    }

    #[cfg(test)]
    pub fn set_item(&self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        let mut inner = self.lock();
        inner.items.insert(key.to_string(), value.into());
        persist(&inner)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut inner = self.lock();
        if inner.items.remove(key).is_some() {
            persist(&inner)?;
        }
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.get_item(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn store_login(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(user)?;
        let mut inner = self.lock();
        inner.items.insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        inner.items.insert(USER_KEY.to_string(), encoded);
        persist(&inner)
    }

    /// Drops both credentials.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut inner = self.lock();
        let had_token = inner.items.remove(ACCESS_TOKEN_KEY).is_some();
        let had_user = inner.items.remove(USER_KEY).is_some();
        if had_token || had_user {
            persist(&inner)?;
        }
        Ok(())
    }

    /// The stored user, if it parses. Malformed JSON is removed and yields `None`.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.get_item(USER_KEY)?;
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "stored user is malformed, discarding");
                if let Err(err) = self.remove_item(USER_KEY) {
                    warn!(error = %err, "could not discard malformed user");
                }
                None
            }
        }
    }

    /// A token plus an admin user, or nothing.
    pub fn admin_session(&self) -> Option<AdminSession> {
        let token = self.access_token()?;
        let user = self.user()?;
        if !user.is_admin() {
            debug!(username = %user.username, role = %user.role, "stored user is not an admin");
            return None;
        }
        Some(AdminSession { token, user })
    }

    pub fn is_authenticated(&self) -> bool {
        self.admin_session().is_some()
    }
}

fn persist(inner: &Inner) -> Result<(), SessionError> {
    let Some(path) = &inner.path else {
        return Ok(());
    };
    write_atomically(path, &serde_json::to_vec_pretty(&inner.items)?)?;
    Ok(())
}

fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserProfile {
        UserProfile {
            id: Some(1),
            username: "admin".to_string(),
            email: Some("admin@titan.local".to_string()),
            full_name: None,
            role: "admin".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn login_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path);
        store.store_login("tok-1", &admin()).unwrap();

        let reopened = SessionStore::open(&path);
        let session = reopened.admin_session().unwrap();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user.username, "admin");
    }

    #[test]
    fn clear_removes_both_keys_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::open(&path);
        store.store_login("tok-1", &admin()).unwrap();
        store.clear().unwrap();

        let reopened = SessionStore::open(&path);
        assert!(reopened.get_item(ACCESS_TOKEN_KEY).is_none());
        assert!(reopened.get_item(USER_KEY).is_none());
    }

    #[test]
    fn non_admin_user_is_not_a_session() {
        let store = SessionStore::in_memory();
        let mut player = admin();
        player.role = "player".to_string();
        store.store_login("tok-2", &player).unwrap();
        assert!(store.user().is_some());
        assert!(store.admin_session().is_none());
    }

    #[test]
    fn user_without_role_is_not_a_session() {
        let store = SessionStore::in_memory();
        store.set_item(ACCESS_TOKEN_KEY, "tok").unwrap();
        store.set_item(USER_KEY, r#"{"username":"ghost"}"#).unwrap();
        assert!(store.admin_session().is_none());
    }

    #[test]
    fn malformed_user_is_discarded() {
        let store = SessionStore::in_memory();
        store.set_item(ACCESS_TOKEN_KEY, "tok").unwrap();
        store.set_item(USER_KEY, "{not json").unwrap();
        assert!(store.user().is_none());
        assert!(store.get_item(USER_KEY).is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "garbage").unwrap();
        let store = SessionStore::open(&path);
        assert!(store.access_token().is_none());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        other.store_login("tok", &admin()).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("tok"));
    }
}
