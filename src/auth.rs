//! Credential Storage
//!
//! The persisted token + user-profile pair of the single signed-in user.

use crate::error::{RequestError, Result};
use crate::platform::{KeyValueStore, Navigator, Notifier};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the user profile as JSON text
pub const USER_INFO_KEY: &str = "userInfo";

/// Storage key of the unsent post draft, dropped on logout
pub const PUBLISH_DRAFT_KEY: &str = "publishDraft";

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub user_info: Value,
}

impl Credential {
    pub fn new(token: impl Into<String>, user_info: Value) -> Self {
        Self {
            token: token.into(),
            user_info,
        }
    }
}

/// Accessor for the active credential in host storage
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Underlying key-value store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Current bearer token, ignoring empty values
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Current user profile; unparseable text is treated as absent
    pub fn current_user(&self) -> Option<Value> {
        let raw = self.store.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "stored user info is not valid JSON");
                None
            }
        }
    }

    /// Full credential, when both halves are present
    pub fn credential(&self) -> Option<Credential> {
        Some(Credential {
            token: self.token()?,
            user_info: self.current_user()?,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential().is_some()
    }

    /// Persist a credential, replacing the active one
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let user_info = serde_json::to_string(&credential.user_info)
            .map_err(|e| RequestError::InvalidRequest(format!("user info: {}", e)))?;
        self.store.set(TOKEN_KEY, &credential.token)?;
        self.store.set(USER_INFO_KEY, &user_info)?;
        Ok(())
    }

    /// Drop the active credential
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_INFO_KEY)?;
        Ok(())
    }

    /// Explicit logout: the credential plus any per-user draft
    pub fn logout(&self) -> Result<()> {
        self.clear()?;
        self.store.remove(PUBLISH_DRAFT_KEY)
    }

    /// Ask the user before logging out; returns whether the logout happened
    pub async fn confirm_logout(&self, notifier: &dyn Notifier) -> Result<bool> {
        if !notifier
            .modal("Log out", "Do you want to log out of this account?")
            .await
        {
            return Ok(false);
        }
        self.logout()?;
        Ok(true)
    }

    /// Redirect to `login_route` when no credential is active
    pub fn check_login(&self, navigator: &dyn Navigator, login_route: &str) -> bool {
        if self.is_logged_in() {
            return true;
        }
        navigator.relaunch(login_route);
        false
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
