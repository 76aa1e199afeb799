// SPDX-License-Identifier: Apache-2.0

//! Test helpers for reqres-users integration tests.
//!
//! Provides a counting cache wrapper and canned Reqres API payloads so the
//! orchestrator's cache interactions can be asserted without reaching into
//! backend internals.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use reqres_users::cache::{CacheStats, MemoryCache, PageKey, UserListCache};
use reqres_users::errors::CacheError;
use reqres_users::user::FetchResult;

/// Cache wrapper that counts every write and invalidation.
///
/// Delegates storage to a [`MemoryCache`] and records how often each
/// mutating operation was called, which is what the change-detection tests
/// assert on.
#[derive(Default)]
pub struct RecordingCache {
    inner: MemoryCache,
    response_writes: AtomicUsize,
    baseline_writes: AtomicUsize,
    invalidations: AtomicUsize,
    last_invalidated_tags: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response_writes(&self) -> usize {
        self.response_writes.load(Ordering::SeqCst)
    }

    pub fn baseline_writes(&self) -> usize {
        self.baseline_writes.load(Ordering::SeqCst)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn last_invalidated_tags(&self) -> Vec<String> {
        self.last_invalidated_tags.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserListCache for RecordingCache {
    async fn get_response(&self, key: &PageKey) -> Option<FetchResult> {
        self.inner.get_response(key).await
    }

    async fn insert_response(
        &self,
        key: PageKey,
        result: FetchResult,
        ttl: Duration,
        tags: &[&str],
    ) -> Result<(), CacheError> {
        self.response_writes.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_response(key, result, ttl, tags).await
    }

    async fn invalidate_tags(&self, tags: &[&str]) -> Result<(), CacheError> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        *self.last_invalidated_tags.lock().unwrap() =
            tags.iter().map(|t| t.to_string()).collect();
        self.inner.invalidate_tags(tags).await
    }

    async fn get_baseline(&self, key: &PageKey) -> Option<String> {
        self.inner.get_baseline(key).await
    }

    async fn set_baseline(&self, key: PageKey, hash: String) -> Result<(), CacheError> {
        self.baseline_writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_baseline(key, hash).await
    }

    async fn stats(&self) -> CacheStats {
        self.inner.stats().await
    }

    fn name(&self) -> &'static str {
        "RecordingCache"
    }
}

/// In-memory sink for formatted log output.
///
/// Cloned handles share one buffer, so the handle kept by the test sees the
/// lines written through the handle installed in the subscriber.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Number of captured error-level log lines.
    pub fn error_lines(&self) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains("ERROR"))
            .count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Installs an error-level capturing subscriber as the thread-local default.
///
/// Keep the guard alive for the duration of the assertion window; emission
/// happens on the test thread since the test runtimes are single-threaded.
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(Level::ERROR)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

/// One raw API item as the Reqres API reports it.
pub fn api_item(id: u64, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "email": format!(
            "{}.{}@reqres.in",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        "first_name": first_name,
        "last_name": last_name,
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

/// A complete users-page payload in the upstream shape.
pub fn api_page(page: u32, per_page: u32, total: u64, items: Vec<Value>) -> Value {
    let total_pages = if per_page == 0 {
        0
    } else {
        total.div_ceil(u64::from(per_page))
    };
    json!({
        "page": page,
        "per_page": per_page,
        "total": total,
        "total_pages": total_pages,
        "data": items,
        "support": {
            "url": "https://reqres.in/#support-heading",
            "text": "To keep ReqRes free, contributions towards server costs are appreciated!"
        }
    })
}

/// The first Reqres page with two of the canonical demo users.
pub fn default_page() -> Value {
    api_page(
        1,
        6,
        12,
        vec![api_item(1, "George", "Bluth"), api_item(2, "Janet", "Weaver")],
    )
}
