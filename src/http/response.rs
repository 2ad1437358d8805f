//! HTTP response building module
//!
//! Builders for every response the file handler produces. None of them set
//! caching headers; those are added by the no-cache middleware.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use hyper::{Response, StatusCode};
use std::time::SystemTime;

use super::cache::format_http_date;
use crate::error::ServeError;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Build 200 response for a regular file
///
/// HEAD keeps the full `Content-Length` but sends no body.
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    modified: Option<SystemTime>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length);
    if let Some(modified) = modified {
        builder = builder.header(LAST_MODIFIED, format_http_date(modified));
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 304 Not Modified response
pub fn build_304_response(modified: SystemTime) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(LAST_MODIFIED, format_http_date(modified))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect, used to add the trailing slash to directory URLs
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the error page for a failed request
pub fn build_error_response(err: &ServeError, is_head: bool) -> Response<Full<Bytes>> {
    let status = err.status();
    let page = error_page(status, err.message());
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    let mut builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length);
    if status == StatusCode::METHOD_NOT_ALLOWED {
        builder = builder.header(ALLOW, "GET, HEAD");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = status;
        fallback
    })
}

fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{code} {reason}</title>\n</head>\n<body>\n<h1>{code} {reason}</h1>\n\
         <p>{message}.</p>\n</body>\n</html>\n"
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_file_response() {
        let resp = build_file_response(
            Bytes::from_static(b"<h1>hi</h1>"),
            "text/html; charset=utf-8",
            Some(SystemTime::UNIX_EPOCH),
            false,
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "11");
        assert_eq!(resp.headers()[LAST_MODIFIED], "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(body_of(resp).await, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_file_response(Bytes::from_static(b"abcdef"), "text/plain", None, true);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "6");
        assert!(resp.headers().get(LAST_MODIFIED).is_none());
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_error_response() {
        let resp = build_error_response(&ServeError::NotFound("/x".into()), false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_TYPE], HTML_CONTENT_TYPE);
        let body = body_of(resp).await;
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("404 Not Found"));
        assert!(text.contains("File not found"));
    }

    #[test]
    fn test_method_not_allowed_sets_allow() {
        let resp = build_error_response(&ServeError::MethodNotAllowed("POST".into()), false);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET, HEAD");
    }

    #[test]
    fn test_redirect() {
        let resp = build_redirect_response("/docs/?v=1");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/docs/?v=1");
    }
}
