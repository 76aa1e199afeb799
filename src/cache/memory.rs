// SPDX-License-Identifier: Apache-2.0

//! In-memory cache with per-entry expiry and tag invalidation.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheStats, PageKey, UserListCache};
use crate::errors::CacheError;
use crate::user::FetchResult;

/// Response entry with its absolute expiry and attached tags.
#[derive(Debug, Clone)]
struct ResponseEntry {
    result: FetchResult,
    expires_at: Instant,
    tags: HashSet<String>,
}

impl ResponseEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct MemoryCacheState {
    responses: HashMap<PageKey, ResponseEntry>,
    baselines: HashMap<PageKey, String>,
    stats: CacheStats,
}

/// In-memory cache backend.
///
/// Responses are kept in a `HashMap` with an absolute expiry recorded at
/// insert time; expired entries are dropped on read. Tag invalidation removes
/// every response entry whose tag set intersects the invalidated tags, so a
/// later read misses regardless of the entry's expiry. Baselines live in a
/// second map with no expiry and are untouched by tag invalidation.
///
/// Thread-safe via a `tokio::sync::Mutex`; no further coordination is done,
/// so concurrent writers for the same key race and the last write wins.
#[derive(Debug, Default)]
pub struct MemoryCache {
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserListCache for MemoryCache {
    async fn get_response(&self, key: &PageKey) -> Option<FetchResult> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        // Resolve the lookup first so the map borrow is released before the
        // stats are updated.
        let lookup = state.responses.get(key).map(|entry| {
            if entry.is_expired(now) {
                None
            } else {
                Some(entry.result.clone())
            }
        });

        match lookup {
            Some(Some(result)) => {
                state.stats.hits += 1;
                debug!(key = %key, "cache hit");
                Some(result)
            }
            Some(None) => {
                debug!(key = %key, "cache entry expired");
                state.responses.remove(key);
                state.stats.expirations += 1;
                state.stats.misses += 1;
                state.stats.entries = state.responses.len();
                None
            }
            None => {
                state.stats.misses += 1;
                debug!(key = %key, "cache miss");
                None
            }
        }
    }

    async fn insert_response(
        &self,
        key: PageKey,
        result: FetchResult,
        ttl: Duration,
        tags: &[&str],
    ) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "storing response");
        state.responses.insert(
            key,
            ResponseEntry {
                result,
                expires_at: Instant::now() + ttl,
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        );
        state.stats.entries = state.responses.len();
        Ok(())
    }

    async fn invalidate_tags(&self, tags: &[&str]) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;
        let before = state.responses.len();
        state
            .responses
            .retain(|_, entry| !tags.iter().any(|t| entry.tags.contains(*t)));
        let evicted = before - state.responses.len();
        state.stats.invalidations += evicted as u64;
        state.stats.entries = state.responses.len();
        debug!(?tags, evicted, "invalidated tags");
        Ok(())
    }

    async fn get_baseline(&self, key: &PageKey) -> Option<String> {
        self.state.lock().await.baselines.get(key).cloned()
    }

    async fn set_baseline(&self, key: PageKey, hash: String) -> Result<(), CacheError> {
        self.state.lock().await.baselines.insert(key, hash);
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRecord;

    fn sample_result(total: u64) -> FetchResult {
        FetchResult {
            users: vec![UserRecord {
                id: 1,
                email: "george.bluth@reqres.in".into(),
                first_name: "George".into(),
                last_name: "Bluth".into(),
            }],
            total,
            total_pages: 2,
        }
    }

    #[tokio::test]
    async fn basic_insert_and_get() {
        let cache = MemoryCache::new();
        let key = PageKey::new(1, 6);

        assert!(cache.get_response(&key).await.is_none());

        cache
            .insert_response(
                key.clone(),
                sample_result(12),
                Duration::from_secs(60),
                &["reqres_users"],
            )
            .await
            .unwrap();

        let hit = cache.get_response(&key).await.unwrap();
        assert_eq!(hit.total, 12);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn expired_entry_misses() {
        let cache = MemoryCache::new();
        let key = PageKey::new(1, 6);

        cache
            .insert_response(key.clone(), sample_result(12), Duration::ZERO, &[])
            .await
            .unwrap();

        assert!(cache.get_response(&key).await.is_none());
        let stats = cache.stats().await;
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test]
    async fn tag_invalidation_evicts_all_tagged_entries() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(300);

        for page in 1..=3 {
            cache
                .insert_response(
                    PageKey::new(page, 6),
                    sample_result(12),
                    ttl,
                    &["reqres_users"],
                )
                .await
                .unwrap();
        }
        cache
            .insert_response(PageKey::new(9, 6), sample_result(12), ttl, &["other"])
            .await
            .unwrap();

        cache.invalidate_tags(&["reqres_users"]).await.unwrap();

        for page in 1..=3 {
            assert!(cache.get_response(&PageKey::new(page, 6)).await.is_none());
        }
        // Differently tagged entry survives.
        assert!(cache.get_response(&PageKey::new(9, 6)).await.is_some());

        let stats = cache.stats().await;
        assert_eq!(stats.invalidations, 3);
    }

    #[tokio::test]
    async fn baselines_survive_tag_invalidation() {
        let cache = MemoryCache::new();
        let key = PageKey::new(1, 6);

        cache
            .set_baseline(key.clone(), "abc123".into())
            .await
            .unwrap();
        cache
            .insert_response(
                key.clone(),
                sample_result(12),
                Duration::from_secs(300),
                &["reqres_users"],
            )
            .await
            .unwrap();

        cache.invalidate_tags(&["reqres_users"]).await.unwrap();

        assert!(cache.get_response(&key).await.is_none());
        assert_eq!(cache.get_baseline(&key).await.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn baseline_overwrite_wins() {
        let cache = MemoryCache::new();
        let key = PageKey::new(2, 6);

        cache.set_baseline(key.clone(), "old".into()).await.unwrap();
        cache.set_baseline(key.clone(), "new".into()).await.unwrap();

        assert_eq!(cache.get_baseline(&key).await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn response_and_baseline_namespaces_are_independent() {
        let cache = MemoryCache::new();
        let key = PageKey::new(1, 6);

        cache.set_baseline(key.clone(), "abc".into()).await.unwrap();
        // A baseline for a key must not look like a cached response.
        assert!(cache.get_response(&key).await.is_none());
    }
}
