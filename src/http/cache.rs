//! HTTP validator module
//!
//! `Last-Modified` formatting and `If-Modified-Since` evaluation.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an IMF-fixdate, tolerating RFC 2822 variants (numeric zones)
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc2822(value).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

/// Check whether the client's copy is still current
///
/// `If-None-Match` takes precedence over `If-Modified-Since`; since no
/// entity tags are issued its presence disables the date check. The
/// comparison uses whole seconds, the resolution of an HTTP date.
///
/// # Returns
/// Returns true if the response should be 304 Not Modified
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    modified: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
