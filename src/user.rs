// SPDX-License-Identifier: Apache-2.0

//! User records mapped from raw Reqres API items.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single user as reported by the Reqres API.
///
/// Constructed once per fetch from a raw API item and immutable afterwards.
/// Mapping is coercion-only: missing or non-coercible fields become zero or
/// the empty string, matching what the upstream API has always tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    /// Maps one raw item from the API `data` array into a typed record.
    ///
    /// `id` accepts an integer or a numeric string; the name and email
    /// fields accept strings or numbers. Unknown fields are ignored.
    pub fn from_api_item(item: &Value) -> Self {
        Self {
            id: coerce_id(item.get("id")),
            email: coerce_string(item.get("email")),
            first_name: coerce_string(item.get("first_name")),
            last_name: coerce_string(item.get("last_name")),
        }
    }
}

/// Outcome of a single page fetch.
///
/// `total` and `total_pages` always reflect the unfiltered upstream report,
/// even when a [`UserFilter`](crate::filter::UserFilter) dropped or replaced
/// entries in `users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub users: Vec<UserRecord>,
    pub total: u64,
    pub total_pages: u64,
}

impl FetchResult {
    /// The zero result every failed fetch normalizes to.
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }
}

fn coerce_id(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
