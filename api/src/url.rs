//! Backend URL joining.

#[cfg(test)]
#[path = "url_test.rs"]
mod url_test;

/// Join a configured base URL with an API path.
///
/// An empty base yields the bare path so requests stay same-origin (the host
/// server proxies `/api`). Trailing slashes on the base and a missing leading
/// slash on the path are normalized so the result never contains `//` at the
/// seam. Any path prefix on the base is preserved.
#[must_use]
pub fn join_api_url(base: &str, path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    format!("{base}{path}")
}

/// Path of a single admin document.
#[must_use]
pub fn document_path(id: &str) -> String {
    format!("{}/{id}", crate::documents::DOCUMENTS_PATH)
}

/// Path of a sub-resource of an admin document (`process`, `view`, `chunks`).
#[must_use]
pub fn document_action_path(id: &str, action: &str) -> String {
    format!("{}/{id}/{action}", crate::documents::DOCUMENTS_PATH)
}
