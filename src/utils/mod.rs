//! Utility functions and helpers.

pub mod html;
pub mod log;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a link found on the catalog against the site origin.
///
/// Absolute `http(s)` links are returned untouched; anything else is joined
/// onto the origin's root.
pub fn resolve_link(base: &Url, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    let mut origin = base.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);

    if href.starts_with("//") {
        return resolve_url(&origin, href);
    }
    resolve_url(&origin, href.trim_start_matches('/'))
}

/// Collapse every whitespace run into one space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
