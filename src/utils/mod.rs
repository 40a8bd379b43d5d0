//! Utility functions and helpers.

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Whether a resolved link is fetchable over HTTP(S).
pub fn is_http_url(url_str: &str) -> bool {
    matches!(
        Url::parse(url_str).map(|u| u.scheme().to_string()),
        Ok(scheme) if scheme == "http" || scheme == "https"
    )
}
