// SPDX-License-Identifier: Apache-2.0

//! Extension hook over the fetched user list.
//!
//! External code can inspect, reorder, drop or replace the mapped users
//! before they are cached and returned. The hook runs exactly once per
//! non-cached fetch, synchronously, after mapping and before the response is
//! cached. It never sees or affects the upstream `total`/`total_pages`
//! counts.

use crate::user::UserRecord;

/// Filter applied to the mapped user list of one fetched page.
///
/// The implementation receives ownership of the list and the page context it
/// was fetched for, and returns the list that becomes the final `users`
/// value (possibly empty). Without a registered filter the list passes
/// through unchanged.
///
/// Closures with the matching signature implement this trait directly:
///
/// ```
/// use reqres_users::filter::UserFilter;
/// use reqres_users::user::UserRecord;
///
/// let no_example_com = |users: Vec<UserRecord>, _page: u32, _per_page: u32| {
///     users
///         .into_iter()
///         .filter(|u| !u.email.ends_with("@example.com"))
///         .collect::<Vec<_>>()
/// };
/// let kept = no_example_com.filter(Vec::new(), 1, 6);
/// assert!(kept.is_empty());
/// ```
pub trait UserFilter: Send + Sync {
    fn filter(&self, users: Vec<UserRecord>, page: u32, per_page: u32) -> Vec<UserRecord>;
}

impl<F> UserFilter for F
where
    F: Fn(Vec<UserRecord>, u32, u32) -> Vec<UserRecord> + Send + Sync,
{
    fn filter(&self, users: Vec<UserRecord>, page: u32, per_page: u32) -> Vec<UserRecord> {
        self(users, page, per_page)
    }
}
