// SPDX-License-Identifier: Apache-2.0

//! No-operation cache that disables caching entirely.

use std::time::Duration;

use async_trait::async_trait;

use super::{CacheStats, PageKey, UserListCache};
use crate::errors::CacheError;
use crate::user::FetchResult;

/// A cache backend that never stores anything.
///
/// Reads always miss and writes are ignored, for both the response and the
/// baseline namespace. With this backend every fetch goes upstream and no
/// change detection takes place (there is never a previous baseline), so it
/// behaves like a permanent `cache_ttl = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl UserListCache for NoOpCache {
    async fn get_response(&self, _key: &PageKey) -> Option<FetchResult> {
        None
    }

    async fn insert_response(
        &self,
        _key: PageKey,
        _result: FetchResult,
        _ttl: Duration,
        _tags: &[&str],
    ) -> Result<(), CacheError> {
        Ok(())
    }

    async fn invalidate_tags(&self, _tags: &[&str]) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get_baseline(&self, _key: &PageKey) -> Option<String> {
        None
    }

    async fn set_baseline(&self, _key: PageKey, _hash: String) -> Result<(), CacheError> {
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}
