// SPDX-License-Identifier: Apache-2.0

//! Server-rendered user table with pager links.
//!
//! The widget renders into a wrapper `<div>` whose id is derived from the
//! widget instance, so a pagination click can be answered with a
//! replacement fragment for exactly that element. Rendering is plain string
//! assembly over the already-fetched [`FetchResult`]; the fetch itself goes
//! through [`ReqresClient`].

use std::fmt::Write as _;
use std::time::Duration;

use url::Url;

use crate::client::{DEFAULT_CACHE_TTL, ReqresClient};
use crate::config::WidgetConfig;
use crate::pager::{build_pager, PagerLink, PagerParams};
use crate::user::FetchResult;

/// Decoded query parameters of one pagination click.
///
/// `page` is zero-based on the wire and converted to the API's one-based
/// index at fetch time. Out-of-range values are clamped to the widget's
/// bounds and the wrapper id is reduced to CSS-identifier-safe characters
/// before it is interpolated into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
    pub cache_ttl_secs: u64,
    pub email_label: String,
    pub forename_label: String,
    pub surname_label: String,
    pub wrapper_id: String,
}

impl Default for PageRequest {
    fn default() -> Self {
        let config = WidgetConfig::default();
        Self {
            page: 0,
            per_page: config.items_per_page,
            cache_ttl_secs: config.cache_ttl_secs,
            email_label: config.email_label,
            forename_label: config.forename_label,
            surname_label: config.surname_label,
            wrapper_id: String::new(),
        }
    }
}

impl PageRequest {
    /// Decodes a pagination request from raw query pairs.
    ///
    /// Unknown parameters are ignored; missing or unparsable ones fall back
    /// to the widget defaults (`page` 0, `per_page` 6, `cache_ttl` 300).
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::default();
        for (name, value) in pairs {
            match name {
                "page" => request.page = value.parse().unwrap_or(0),
                "per_page" => request.per_page = value.parse().unwrap_or(6).max(1),
                "cache_ttl" => {
                    request.cache_ttl_secs = value.parse().unwrap_or(DEFAULT_CACHE_TTL.as_secs());
                }
                "email_label" => request.email_label = value.to_string(),
                "forename_label" => request.forename_label = value.to_string(),
                "surname_label" => request.surname_label = value.to_string(),
                "wrapper_id" => request.wrapper_id = clean_css_identifier(value),
                _ => {}
            }
        }
        request
    }

    /// One-based upstream page for this zero-based request.
    ///
    /// Saturates so a hostile `page=4294967295` query cannot overflow.
    pub fn upstream_page(&self) -> u32 {
        self.page.saturating_add(1)
    }

    fn pager_params(&self) -> PagerParams {
        PagerParams {
            wrapper_id: self.wrapper_id.clone(),
            per_page: self.per_page,
            cache_ttl_secs: self.cache_ttl_secs,
            email_label: self.email_label.clone(),
            forename_label: self.forename_label.clone(),
            surname_label: self.surname_label.clone(),
        }
    }
}

/// Renders the initial widget for a configured instance (page one).
pub async fn render_widget(client: &ReqresClient, endpoint: &Url, config: &WidgetConfig) -> String {
    let result = client
        .get_users(1, config.items_per_page, config.cache_ttl())
        .await;
    let params = PagerParams::from_config(config);
    let pager = build_pager(endpoint, 0, result.total_pages, &params);
    render_user_list(&result, &params, &pager)
}

/// Renders the replacement fragment for one pagination click.
pub async fn render_page(client: &ReqresClient, endpoint: &Url, request: &PageRequest) -> String {
    let result = client
        .get_users(
            request.upstream_page(),
            request.per_page,
            Duration::from_secs(request.cache_ttl_secs),
        )
        .await;
    let params = request.pager_params();
    let pager = build_pager(endpoint, request.page, result.total_pages, &params);
    render_user_list(&result, &params, &pager)
}

/// Renders the wrapper div with the user table and pager markup.
///
/// All interpolated text is HTML-escaped. An empty user list renders a
/// single full-width "No users found." row.
pub fn render_user_list(result: &FetchResult, params: &PagerParams, pager: &[PagerLink]) -> String {
    let mut html = String::new();

    let _ = write!(html, r#"<div id="{}">"#, escape_html(&params.wrapper_id));
    html.push_str("<table><thead><tr>");
    for label in [
        &params.email_label,
        &params.forename_label,
        &params.surname_label,
    ] {
        let _ = write!(html, "<th>{}</th>", escape_html(label));
    }
    html.push_str("</tr></thead><tbody>");

    if result.users.is_empty() {
        html.push_str(r#"<tr><td colspan="3">No users found.</td></tr>"#);
    } else {
        for user in &result.users {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&user.email),
                escape_html(&user.first_name),
                escape_html(&user.last_name),
            );
        }
    }
    html.push_str("</tbody></table>");

    html.push_str(&render_pager(pager));
    html.push_str("</div>");
    html
}

fn render_pager(pager: &[PagerLink]) -> String {
    if pager.is_empty() {
        return String::new();
    }

    let mut html =
        String::from(r#"<nav class="pager" aria-label="Pagination"><ul class="pager__items">"#);
    for link in pager {
        match link {
            PagerLink::Previous { url } => {
                let _ = write!(
                    html,
                    r#"<li class="pager__item pager__item--previous"><a href="{}">&lsaquo; Previous</a></li>"#,
                    escape_html(url.as_str()),
                );
            }
            PagerLink::Numbered { display, url: None } => {
                let _ = write!(
                    html,
                    r#"<li class="pager__item is-active"><span>{display}</span></li>"#,
                );
            }
            PagerLink::Numbered {
                display,
                url: Some(url),
            } => {
                let _ = write!(
                    html,
                    r#"<li class="pager__item"><a href="{}">{display}</a></li>"#,
                    escape_html(url.as_str()),
                );
            }
            PagerLink::Next { url } => {
                let _ = write!(
                    html,
                    r#"<li class="pager__item pager__item--next"><a href="{}">Next &rsaquo;</a></li>"#,
                    escape_html(url.as_str()),
                );
            }
        }
    }
    html.push_str("</ul></nav>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keeps only characters that are safe inside an HTML id / CSS selector.
///
/// Spaces and underscores become hyphens, other unsafe characters are
/// dropped.
fn clean_css_identifier(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' => Some(c),
            ' ' | '_' => Some('-'),
            _ => None,
        })
        .collect()
}
