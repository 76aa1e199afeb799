// SPDX-License-Identifier: Apache-2.0

//! Per-widget display configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_CACHE_TTL;
use crate::errors::ConfigError;

/// Configuration for one placed user-list widget.
///
/// Carries the display parameters a site builder sets per instance: page
/// size, response cache TTL (zero disables caching), the three column
/// labels, and an opaque instance id the wrapper element id is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub items_per_page: u32,
    /// Response cache TTL in seconds; 0 disables caching for this widget.
    pub cache_ttl_secs: u64,
    pub email_label: String,
    pub forename_label: String,
    pub surname_label: String,
    /// Opaque per-instance id; empty until the instance is first saved.
    pub instance_id: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            items_per_page: 6,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            email_label: "Email".into(),
            forename_label: "Forename".into(),
            surname_label: "Surname".into(),
            instance_id: String::new(),
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page < 1 {
            return Err(ConfigError::InvalidItemsPerPage(self.items_per_page));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// HTML id of the wrapper element pagination fragments replace.
    pub fn wrapper_id(&self) -> String {
        let instance = if self.instance_id.is_empty() {
            "unsaved"
        } else {
            &self.instance_id
        };
        format!("reqres-users-block-{instance}")
    }
}
