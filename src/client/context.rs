//! Client Context
//!
//! Fixed settings plus the credential accessor, passed explicitly into the
//! request client instead of being looked up from globals.

use crate::auth::CredentialStore;
use crate::config::ClientSettings;
use crate::platform::{KeyValueStore, MemoryStore};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ClientContext {
    settings: Arc<ClientSettings>,
    credentials: CredentialStore,
}

impl ClientContext {
    pub fn new(settings: ClientSettings, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            credentials: CredentialStore::new(store),
        }
    }

    /// Context backed by a fresh in-memory store
    pub fn in_memory(settings: ClientSettings) -> Self {
        Self::new(settings, Arc::new(MemoryStore::new()))
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}
