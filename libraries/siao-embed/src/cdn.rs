//! Self-hosted video players recognised by host
use url::Url;

/// Returns true if the URL's host contains one of `markers`.
pub(crate) fn matches_host(url: &str, markers: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    markers
        .iter()
        .map(|m| m.trim().to_ascii_lowercase())
        .any(|m| !m.is_empty() && host.contains(&m))
}

/// Append `autoplay=1` to the query, keeping any fragment last.
pub(crate) fn with_autoplay(url: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    match fragment {
        Some(fragment) => format!("{}{}autoplay=1#{}", base, separator, fragment),
        None => format!("{}{}autoplay=1", base, separator),
    }
}
