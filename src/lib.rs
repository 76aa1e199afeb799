// SPDX-License-Identifier: Apache-2.0

//! Cached, change-aware client and table widget for the Reqres demo user API.
//!
//! This crate fetches the paginated user list from `https://reqres.in`,
//! caches mapped responses per `(page, per_page)` key, and detects upstream
//! data changes via a per-page payload digest so that all dependent cached
//! responses can be busted at once. On top of the client sits a
//! server-rendered table widget with pager links for fragment replacement.
//!
//! # Architecture
//!
//! - [`client::ReqresClient`] orchestrates one fetch: response-cache lookup,
//!   HTTP GET on miss, record mapping, the [`filter::UserFilter`] hook,
//!   change detection, cache write.
//! - [`cache::UserListCache`] is the cache collaborator with two independent
//!   namespaces: TTL-and-tag-scoped responses and never-expiring baselines.
//! - [`store::ApiKeyStore`] persists the `x-api-key` value outside the hot
//!   path.
//! - [`pager`] and [`widget`] turn a [`user::FetchResult`] into the embedded
//!   table fragment and its navigation links.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use reqres_users::client::ReqresClient;
//!
//! # async fn example() {
//! let client = ReqresClient::new();
//! let result = client.get_users(1, 6, Duration::from_secs(300)).await;
//! for user in &result.users {
//!     println!("{} {} <{}>", user.first_name, user.last_name, user.email);
//! }
//! # }
//! ```
//!
//! Fetch failures are non-fatal: they are logged once at error level and
//! normalized to the zero result, so a failed upstream call renders as an
//! empty table.

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod filter;
pub mod pager;
pub mod store;
pub mod user;
pub mod widget;

pub use cache::{CacheStats, MemoryCache, NoOpCache, PageKey, UserListCache};
pub use client::{ReqresClient, CACHE_TAG, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, REQUEST_TIMEOUT};
pub use config::WidgetConfig;
pub use errors::{CacheError, ConfigError, FetchError, StoreError};
pub use filter::UserFilter;
pub use pager::{build_pager, PagerLink, PagerParams};
pub use store::{ApiKeyStore, MemoryKeyStore};
pub use user::{FetchResult, UserRecord};
pub use widget::{render_page, render_user_list, render_widget, PageRequest};
