//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, header
//! extraction, and dispatch to the static file handler.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URI path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

/// Main entry point for HTTP request handling
///
/// Never fails: every error becomes an error response. The request body is
/// ignored, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let is_head = *method == Method::HEAD;

    if let Err(err) = check_http_method(method) {
        return Ok(http::build_error_response(&err, is_head));
    }

    let headers = req.headers();
    let ctx = RequestContext {
        path: req.uri().path(),
        query: req.uri().query(),
        is_head,
        if_modified_since: headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok()),
        has_if_none_match: headers.contains_key(IF_NONE_MATCH),
    };

    let response = match static_files::serve_path(&ctx, &state).await {
        Ok(resp) => resp,
        Err(err) => {
            report(&err);
            http::build_error_response(&err, ctx.is_head)
        }
    };
    Ok(response)
}

/// Only GET and HEAD are served
fn check_http_method(method: &Method) -> Result<(), ServeError> {
    match *method {
        Method::GET | Method::HEAD => Ok(()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Err(ServeError::MethodNotAllowed(method.to_string()))
        }
    }
}

fn report(err: &ServeError) {
    match err {
        ServeError::Io { .. } => logger::log_error(&err.to_string()),
        ServeError::BadRequest(_) | ServeError::Forbidden(_) => {
            logger::log_warning(&err.to_string());
        }
        _ => tracing::debug!(error = %err, "request failed"),
    }
}
