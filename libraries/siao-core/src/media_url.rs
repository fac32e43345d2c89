//! Base-URL join rule for media and image paths
//!
//! The content API returns media locations either as absolute URLs or as
//! paths relative to the media server. Every consumer resolves them the same
//! way through [`join_base_url`].

/// Returns true if `path` already carries an `http://` or `https://` scheme.
///
/// Schemes are case-insensitive, so `HTTPS://host/x` is absolute too.
pub fn is_absolute(path: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        path.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Join a (possibly relative) media path onto the server base URL.
///
/// Absolute `http(s)` paths are returned unchanged. Otherwise one leading `/`
/// is stripped and the result is `<base>/<path>`. A trailing `/` on `base` is
/// ignored so configuration values like `https://cdn.example.com/` behave
/// like `https://cdn.example.com`.
///
/// ```rust
/// use siao_core::media_url::join_base_url;
///
/// assert_eq!(
///     join_base_url("https://cdn.example.com", "/media/a.mp3"),
///     "https://cdn.example.com/media/a.mp3"
/// );
/// assert_eq!(
///     join_base_url("https://cdn.example.com", "https://other.com/x.mp3"),
///     "https://other.com/x.mp3"
/// );
/// ```
pub fn join_base_url(base: &str, path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }

    let clean_path = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", base.trim_end_matches('/'), clean_path)
}

/// Join an optional path, treating missing or blank values as absent.
pub fn resolve_optional(base: &str, path: Option<&str>) -> Option<String> {
    path.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| join_base_url(base, p))
}
