// SPDX-License-Identifier: Apache-2.0

//! Cache backends for fetched user pages.
//!
//! Two independent namespaces share one backend:
//!
//! - **Responses**: the post-filter [`FetchResult`] per `(page, per_page)`
//!   key, with a caller-supplied TTL and a set of tags for bulk
//!   invalidation.
//! - **Baselines**: an md5 hex digest of the raw upstream payload per key,
//!   with no expiry. Baselines survive tag invalidation so the next fetch
//!   can still tell whether upstream data changed again.
//!
//! The namespaces are separate trait methods backed by separate maps, so
//! their key spaces can never collide.
//!
//! Backends:
//!
//! - [`MemoryCache`]: in-memory map with per-entry expiry and tags (default)
//! - [`NoOpCache`]: never stores anything (for tests or cache-free setups)

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CacheError;
use crate::user::FetchResult;

mod memory;
mod noop;

pub use memory::MemoryCache;
pub use noop::NoOpCache;

/// Key for both cache namespaces: one upstream page of one page size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub page: u32,
    pub per_page: u32,
}

impl PageKey {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page, self.per_page)
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Response lookups that returned a live entry.
    pub hits: u64,
    /// Response lookups that found nothing.
    pub misses: u64,
    /// Entries dropped because their expiry had passed.
    pub expirations: u64,
    /// Entries dropped by tag invalidation.
    pub invalidations: u64,
    /// Current number of live response entries.
    pub entries: usize,
}

impl CacheStats {
    /// Cache hit rate as a percentage (0.0 to 100.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, expirations={}, invalidations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.expirations,
            self.invalidations,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Trait for user-list cache backends.
///
/// Implementations must be thread-safe; use interior mutability as needed.
/// Cache failures should never fail a fetch: callers log errors and carry
/// on, treating the operation as best-effort.
#[async_trait]
pub trait UserListCache: Send + Sync {
    /// Retrieves the cached response for a key.
    ///
    /// Returns `None` when the key is absent, the entry has expired, or a
    /// tag carried by the entry has been invalidated since it was written.
    async fn get_response(&self, key: &PageKey) -> Option<FetchResult>;

    /// Stores a response with an absolute expiry of now + `ttl`, carrying
    /// the given tags.
    async fn insert_response(
        &self,
        key: PageKey,
        result: FetchResult,
        ttl: Duration,
        tags: &[&str],
    ) -> Result<(), CacheError>;

    /// Evicts every response entry carrying any of the given tags.
    ///
    /// Subsequent reads of evicted keys miss regardless of their recorded
    /// expiry. Baseline entries are not affected.
    async fn invalidate_tags(&self, tags: &[&str]) -> Result<(), CacheError>;

    /// Retrieves the stored payload digest for a key, if any.
    async fn get_baseline(&self, key: &PageKey) -> Option<String>;

    /// Stores the payload digest for a key. Baselines never expire.
    async fn set_baseline(&self, key: PageKey, hash: String) -> Result<(), CacheError>;

    /// Returns current cache statistics.
    async fn stats(&self) -> CacheStats;

    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;
}
