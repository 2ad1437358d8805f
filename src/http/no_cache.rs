//! No-cache header set
//!
//! The three headers that together tell browsers and intermediaries to treat
//! every response as already stale.

use hyper::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";
pub const PRAGMA_VALUE: &str = "no-cache";
pub const EXPIRES_VALUE: &str = "0";

/// Set the no-cache headers, replacing any caching directives already present
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}

/// Whether `headers` carries exactly the no-cache values
#[cfg(test)]
pub fn is_applied(headers: &HeaderMap) -> bool {
    [
        (CACHE_CONTROL, CACHE_CONTROL_VALUE),
        (PRAGMA, PRAGMA_VALUE),
        (EXPIRES, EXPIRES_VALUE),
    ]
    .iter()
    .all(|(name, value)| {
        let mut values = headers.get_all(name).iter();
        values.next().is_some_and(|v| v == *value) && values.next().is_none()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_on_empty_map() {
        let mut headers = HeaderMap::new();
        apply(&mut headers);
        assert_eq!(headers[CACHE_CONTROL], CACHE_CONTROL_VALUE);
        assert_eq!(headers[PRAGMA], "no-cache");
        assert_eq!(headers[EXPIRES], "0");
        assert!(is_applied(&headers));
    }

    #[test]
    fn test_apply_replaces_existing_directives() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
        headers.append(CACHE_CONTROL, HeaderValue::from_static("immutable"));
        assert!(!is_applied(&headers));

        apply(&mut headers);
        assert_eq!(headers.get_all(CACHE_CONTROL).iter().count(), 1);
        assert!(is_applied(&headers));
    }
}
