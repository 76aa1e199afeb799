// SPDX-License-Identifier: Apache-2.0

//! Navigation links for the paginated user table.
//!
//! Pager links are plain navigational URLs against a fragment endpoint:
//! each one carries the zero-based target page index plus the constant
//! display parameters the endpoint needs to rebuild the same widget
//! (wrapper id, page size, cache TTL, column labels).

use url::Url;

use crate::config::WidgetConfig;

/// Query parameters that stay constant across all links of one pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerParams {
    pub wrapper_id: String,
    pub per_page: u32,
    pub cache_ttl_secs: u64,
    pub email_label: String,
    pub forename_label: String,
    pub surname_label: String,
}

impl PagerParams {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            wrapper_id: config.wrapper_id(),
            per_page: config.items_per_page,
            cache_ttl_secs: config.cache_ttl_secs,
            email_label: config.email_label.clone(),
            forename_label: config.forename_label.clone(),
            surname_label: config.surname_label.clone(),
        }
    }
}

/// One entry of the pager.
///
/// The active page carries no URL; it renders as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerLink {
    Previous { url: Url },
    Numbered { display: u64, url: Option<Url> },
    Next { url: Url },
}

/// Builds the pager link set for one rendered page.
///
/// `current_page` is zero-based; `total_pages` is the unfiltered upstream
/// page count. A single page (or none) yields no pager at all. Otherwise the
/// set is an optional previous link, one numbered entry per page with the
/// current one marked active, and an optional next link.
pub fn build_pager(
    endpoint: &Url,
    current_page: u32,
    total_pages: u64,
    params: &PagerParams,
) -> Vec<PagerLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut links = Vec::with_capacity(total_pages as usize + 2);

    if current_page > 0 {
        links.push(PagerLink::Previous {
            url: page_url(endpoint, current_page - 1, params),
        });
    }

    for page in 0..total_pages {
        let url = if page == u64::from(current_page) {
            None
        } else {
            Some(page_url(endpoint, page as u32, params))
        };
        links.push(PagerLink::Numbered {
            display: page + 1,
            url,
        });
    }

    if u64::from(current_page) < total_pages - 1 {
        links.push(PagerLink::Next {
            url: page_url(endpoint, current_page.saturating_add(1), params),
        });
    }

    links
}

/// URL of the fragment endpoint for one zero-based target page.
pub fn page_url(endpoint: &Url, page: u32, params: &PagerParams) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string())
        .append_pair("per_page", &params.per_page.to_string())
        .append_pair("cache_ttl", &params.cache_ttl_secs.to_string())
        .append_pair("email_label", &params.email_label)
        .append_pair("forename_label", &params.forename_label)
        .append_pair("surname_label", &params.surname_label)
        .append_pair("wrapper_id", &params.wrapper_id);
    url
}
