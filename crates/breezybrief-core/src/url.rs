//! Helpers for building API URLs from the configured base.

use ::url::Url;

/// Join `base` and `path` with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Make a server-provided map URL absolute.
///
/// Absolute `http(s)` URLs pass through; relative ones (`/maps/x.html` or
/// `maps/x.html`) are resolved under `base`, keeping any path prefix it has.
/// Empty input, other schemes and an unparseable base yield `None`.
pub fn absolute_map_url(base: &str, map_url: &str) -> Option<String> {
    let map_url = map_url.trim();
    if map_url.is_empty() {
        return None;
    }

    match Url::parse(map_url) {
        Ok(url) if is_http(&url) => return Some(url.into()),
        Ok(_) => return None,
        Err(::url::ParseError::RelativeUrlWithoutBase) => {}
        Err(_) => return None,
    }

    let base = Url::parse(&format!("{}/", base.trim_end_matches('/'))).ok()?;
    base.join(map_url.trim_start_matches('/')).ok().map(Into::into)
}

/// Parse an API base URL, accepting only `http(s)` with a host.
pub fn parse_base_url(base: &str) -> Option<Url> {
    Url::parse(base)
        .ok()
        .filter(|url| is_http(url) && url.host_str().is_some_and(|h| !h.is_empty()))
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
