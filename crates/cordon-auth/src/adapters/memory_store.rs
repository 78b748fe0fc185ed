use crate::domain::key::{AuthInfo, AuthKey};
use crate::error::StoreError;
use crate::ports::outbound::AuthStateStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory implementation of AuthStateStore for testing and local runs
pub struct InMemoryAuthStore {
    entries: RwLock<HashMap<AuthKey, AuthInfo>>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Seed an entry without going through the port.
    pub fn insert(&self, key: AuthKey, info: AuthInfo) {
        self.entries.write().insert(key, info);
    }

    pub fn remove(&self, key: &AuthKey) -> Option<AuthInfo> {
        self.entries.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for InMemoryAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthStateStore for InMemoryAuthStore {
    async fn get(&self, key: &AuthKey) -> Result<Option<AuthInfo>, StoreError> {
        Ok(self.entries.read().get(key).copied())
    }

    async fn update(&self, key: AuthKey, info: AuthInfo) -> Result<(), StoreError> {
        self.entries.write().insert(key, info);
        Ok(())
    }

    async fn all(&self) -> Result<HashMap<AuthKey, AuthInfo>, StoreError> {
        Ok(self.entries.read().clone())
    }
}
