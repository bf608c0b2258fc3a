//! URL classification for the crawler
//!
//! Pure functions that compute a URL's hostname and path depth and decide
//! whether it lies within the crawl scope (same hostname as the seed, depth
//! within the configured bound). No I/O, no state.

use crate::{UrlError, UrlResult};

/// Extracts the authority component of a URL
///
/// The hostname is the portion between the scheme separator (`://`) and the
/// first following path separator. Ports are kept as part of the hostname.
///
/// # Errors
///
/// Returns [`UrlError::MissingScheme`] when the URL has no `://` separator
/// and [`UrlError::MissingHost`] when nothing follows it.
///
/// # Examples
///
/// ```
/// use octolink::url::hostname_of;
///
/// assert_eq!(hostname_of("https://example.com/a/b").unwrap(), "example.com");
/// assert_eq!(hostname_of("http://127.0.0.1:8080/x").unwrap(), "127.0.0.1:8080");
/// assert!(hostname_of("mailto:me@example.com").is_err());
/// ```
pub fn hostname_of(url: &str) -> UrlResult<&str> {
    let rest = url
        .split_once("://")
        .ok_or_else(|| UrlError::MissingScheme(url.to_string()))?
        .1;

    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(host)
}

/// Counts the non-empty path segments of a URL after its hostname
///
/// Query strings and fragments do not contribute to depth:
/// `http://h/a/b?x=1` has depth 2, the same as `http://h/a/b`.
///
/// # Errors
///
/// Returns [`UrlError::HostNotFound`] when `hostname` does not occur in the
/// URL.
pub fn depth_of(url: &str, hostname: &str) -> UrlResult<u32> {
    let (_, path) = url.split_once(hostname).ok_or_else(|| UrlError::HostNotFound {
        url: url.to_string(),
        host: hostname.to_string(),
    })?;

    // Everything past '?' or '#' is not part of the path
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or("");

    Ok(path.split('/').filter(|segment| !segment.is_empty()).count() as u32)
}

/// Decides whether a URL is within the crawl scope
///
/// A URL is in scope when its hostname equals `root_hostname` and its depth
/// does not exceed `max_depth`. Malformed URLs are out of scope. Each
/// rejection is logged at info level as a skip; this function never returns
/// an error past its own boundary.
pub fn is_in_scope(url: &str, max_depth: u32, root_hostname: &str) -> bool {
    let hostname = match hostname_of(url) {
        Ok(h) => h,
        Err(_) => {
            tracing::info!("Skipping {}: malformed URL", url);
            return false;
        }
    };

    if hostname != root_hostname {
        tracing::info!("Skipping {}: wrong hostname", url);
        return false;
    }

    match depth_of(url, hostname) {
        Ok(depth) if depth > max_depth => {
            tracing::info!("Skipping {}: max depth reached", url);
            false
        }
        Ok(_) => true,
        Err(_) => {
            tracing::info!("Skipping {}: malformed URL", url);
            false
        }
    }
}
