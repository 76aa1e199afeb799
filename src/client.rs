// SPDX-License-Identifier: Apache-2.0

//! Fetch orchestrator for the Reqres user list.
//!
//! [`ReqresClient`] composes the cache, the key store and the filter hook
//! around a single HTTP GET: check the response cache, call upstream on a
//! miss, map the raw items, apply the filter, compare the payload digest
//! against the stored baseline (invalidating the shared cache tag on
//! change), store the new response, and return it.
//!
//! Fetch failures never escape [`ReqresClient::get_users`]: transport
//! errors, malformed JSON and unexpected response shapes are each logged
//! once at error level and normalized to [`FetchResult::empty`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::cache::{MemoryCache, PageKey, UserListCache};
use crate::errors::{FetchError, StoreError};
use crate::filter::UserFilter;
use crate::store::{ApiKeyStore, MemoryKeyStore};
use crate::user::{FetchResult, UserRecord};

/// Tag attached to every cached response; invalidating it busts all of them.
pub const CACHE_TAG: &str = "reqres_users";

/// Endpoint for the Reqres users resource.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/users";

/// Fixed timeout for upstream requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Response cache TTL used when the caller has no opinion.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the paginated Reqres user list.
///
/// Defaults to the public endpoint, an in-memory cache and an in-memory key
/// store; swap any collaborator with the `with_*` builder methods.
///
/// ```
/// use std::sync::Arc;
/// use reqres_users::cache::NoOpCache;
/// use reqres_users::client::ReqresClient;
///
/// let client = ReqresClient::new().with_cache(Arc::new(NoOpCache));
/// ```
pub struct ReqresClient {
    http: reqwest::Client,
    base_url: Url,
    cache: Arc<dyn UserListCache>,
    key_store: Arc<dyn ApiKeyStore>,
    filter: Option<Arc<dyn UserFilter>>,
}

impl ReqresClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            cache: Arc::new(MemoryCache::new()),
            key_store: Arc::new(MemoryKeyStore::new()),
            filter: None,
        }
    }

    /// Overrides the upstream endpoint (tests point this at a local stub).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Overrides the cache backend.
    pub fn with_cache(mut self, cache: Arc<dyn UserListCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Overrides the API key store.
    pub fn with_key_store(mut self, key_store: Arc<dyn ApiKeyStore>) -> Self {
        self.key_store = key_store;
        self
    }

    /// Registers the filter hook applied to every non-cached fetch.
    pub fn with_filter(mut self, filter: Arc<dyn UserFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Persists the API key sent as `x-api-key` on upstream requests.
    pub async fn set_api_key(&self, key: String) -> Result<(), StoreError> {
        self.key_store.set(key).await
    }

    /// Fetches one page of users, going through the response cache.
    ///
    /// With a non-zero `cache_ttl`, a live cached entry for
    /// `(page, per_page)` is returned verbatim with no upstream call and no
    /// change detection. On a miss the page is fetched, mapped, filtered,
    /// change-checked and cached. With a zero `cache_ttl` neither cache
    /// namespace is read or written and upstream is always called.
    ///
    /// `page` is the upstream API's one-based page index. Failures are
    /// logged and normalized to [`FetchResult::empty`].
    pub async fn get_users(&self, page: u32, per_page: u32, cache_ttl: Duration) -> FetchResult {
        let key = PageKey::new(page, per_page);
        let caching = !cache_ttl.is_zero();

        if caching {
            if let Some(cached) = self.cache.get_response(&key).await {
                return cached;
            }
        }

        let (result, raw_items) = match self.fetch_page(page, per_page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!(error = %e, page, per_page, "failed to fetch users from the Reqres API");
                return FetchResult::empty();
            }
        };

        if caching {
            self.detect_changes(&key, &raw_items).await;
            if let Err(e) = self
                .cache
                .insert_response(key, result.clone(), cache_ttl, &[CACHE_TAG])
                .await
            {
                warn!(error = %e, "failed to cache fetched users");
            }
        }

        result
    }

    /// Uncached fetch of one upstream page.
    ///
    /// Returns the mapped, filtered result together with the raw `data`
    /// items the change-detection digest is computed from.
    async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<(FetchResult, Vec<Value>), FetchError> {
        let api_key = self.key_store.get().await.unwrap_or_default();

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[("page", page), ("per_page", per_page)])
            .header("x-api-key", api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body = response.text().await?;
        let body: Value = serde_json::from_str(&body)?;

        let Some(object) = body.as_object() else {
            return Err(FetchError::UnexpectedShape);
        };
        let raw_items = match object.get("data").and_then(Value::as_array) {
            Some(items) => items.clone(),
            None => return Err(FetchError::UnexpectedShape),
        };
        let (Some(total), Some(total_pages)) = (object.get("total"), object.get("total_pages"))
        else {
            return Err(FetchError::UnexpectedShape);
        };

        let mapped: Vec<UserRecord> = raw_items.iter().map(UserRecord::from_api_item).collect();
        let users = match &self.filter {
            Some(filter) => filter.filter(mapped, page, per_page),
            None => mapped,
        };

        let result = FetchResult {
            users,
            total: coerce_count(total),
            total_pages: coerce_count(total_pages),
        };

        Ok((result, raw_items))
    }

    /// Compares the new payload digest with the stored baseline.
    ///
    /// A differing baseline means upstream data changed since the last
    /// successful fetch for this key, so the shared tag is invalidated and
    /// every cached response is evicted at once. The baseline is then
    /// overwritten unconditionally, without expiry, so it remains the
    /// comparison point for the next fetch even after the eviction. A
    /// missing baseline (first fetch for the key) records the digest and
    /// skips invalidation.
    async fn detect_changes(&self, key: &PageKey, raw_items: &[Value]) {
        let new_hash = content_hash(raw_items);

        if let Some(previous) = self.cache.get_baseline(key).await {
            if previous != new_hash {
                debug!(key = %key, "upstream data changed, invalidating cached responses");
                if let Err(e) = self.cache.invalidate_tags(&[CACHE_TAG]).await {
                    warn!(error = %e, "failed to invalidate cache tag");
                }
            }
        }

        if let Err(e) = self.cache.set_baseline(key.clone(), new_hash).await {
            warn!(error = %e, key = %key, "failed to store payload baseline");
        }
    }
}

impl Default for ReqresClient {
    fn default() -> Self {
        Self::new()
    }
}

/// md5 hex digest of the raw item array.
///
/// Serialization preserves the upstream array order, so a reordered payload
/// hashes differently and is treated as a change.
pub(crate) fn content_hash(raw_items: &[Value]) -> String {
    let serialized = serde_json::to_string(raw_items).unwrap_or_default();
    format!("{:x}", md5::compute(serialized.as_bytes()))
}

fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
