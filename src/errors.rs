// SPDX-License-Identifier: Apache-2.0

//! Error types for the reqres-users library.
//!
//! Fetch failures are deliberately non-fatal at the public boundary:
//! [`ReqresClient::get_users`](crate::client::ReqresClient::get_users) logs
//! them and returns the zero result. The types here exist for the internal
//! fetch path and for cache backends that can actually fail.

/// Errors on the uncached fetch path.
///
/// All three variants are normalized to the zero result by the orchestrator
/// after one error-level log; none reach callers of `get_users`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request failed in transit (connect, timeout, protocol).
    #[error("users endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("users endpoint returned invalid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The body was JSON but not an object carrying `data`, `total` and
    /// `total_pages`.
    #[error("users endpoint returned an unexpected response structure")]
    UnexpectedShape,
}

/// Errors from cache backend operations.
///
/// The bundled in-memory backend is infallible; the variants exist for
/// backends with real I/O. Orchestrator callers treat cache failures as
/// best-effort and log them at warn.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Serializing a value for storage failed.
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific storage failure.
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Errors from the API key store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend-specific storage failure.
    #[error("key store error: {0}")]
    Backend(String),
}

/// Errors from widget configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `items_per_page` must be at least 1.
    #[error("items_per_page must be at least 1, got {0}")]
    InvalidItemsPerPage(u32),
}
