//! URL helper functions

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Generate a URL under the site root
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/hello-world/") // -> "/blog/hello-world/"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com", "/blog/", "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(site_url: &str, root: &str, path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    format!("{}{}", site_url.trim_end_matches('/'), url_for(root, path))
}

/// Whether a pathname is the site's home page
pub fn is_root_path(root: &str, location: &str) -> bool {
    location.trim_end_matches('/') == root.trim_end_matches('/')
}

/// Whether a URL already carries a scheme or is protocol-relative
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

/// Percent-encode a URL component
pub fn encode_url(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
