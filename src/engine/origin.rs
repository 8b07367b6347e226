//! Origin ("base URL") derivation by substring removal.
//!
//! The request path is removed without its leading slash, so the origin
//! keeps a trailing slash: `https://host/a?b` becomes `https://host/`.

use tracing::debug;

/// Remove the first occurrence of `path_without_leading_slash` from `full_url`.
///
/// An empty path, or a path that does not appear in the URL, leaves the URL
/// unchanged.
pub fn extract_origin(full_url: &str, path_without_leading_slash: &str) -> String {
    if path_without_leading_slash.is_empty() {
        return full_url.to_owned();
    }
    if !full_url.contains(path_without_leading_slash) {
        debug!(url = full_url, path = path_without_leading_slash, "path not found in url");
        return full_url.to_owned();
    }
    full_url.replacen(path_without_leading_slash, "", 1)
}

/// Origin of a request given its full URL and its path (leading slash included).
pub fn request_origin(full_url: &str, path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    extract_origin(full_url, trimmed)
}
