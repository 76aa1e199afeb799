// SPDX-License-Identifier: Apache-2.0

//! Persistence for the upstream API key.
//!
//! The Reqres API expects an `x-api-key` header on every request. The key
//! lives outside the fetch hot path in a small key-value store; an unset key
//! is sent as the empty string.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;

/// Storage for the single API key value.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Returns the stored key, or `None` if one was never set.
    async fn get(&self) -> Option<String>;

    /// Persists a new key value.
    async fn set(&self, key: String) -> Result<(), StoreError>;
}

/// Process-local key store.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    key: RwLock<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(key.into())),
        }
    }
}

#[async_trait]
impl ApiKeyStore for MemoryKeyStore {
    async fn get(&self) -> Option<String> {
        self.key.read().await.clone()
    }

    async fn set(&self, key: String) -> Result<(), StoreError> {
        *self.key.write().await = Some(key);
        Ok(())
    }
}
