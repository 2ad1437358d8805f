// Connection handling module
// Serves a single accepted TCP connection

use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::header::{REFERER, USER_AGENT};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, Version};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::middleware::NoCache;
use crate::config::AppState;
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Spawn a task serving `stream` until the client closes it.
///
/// The request handler is wrapped in [`NoCache`], so every response on the
/// connection carries the no-cache headers.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let service = NoCache::new(service_fn(move |req| {
            let state = Arc::clone(&state);
            handle_with_access_log(req, peer_addr, state)
        }));

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Run the request handler, then write the access log line if enabled
async fn handle_with_access_log(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if !state.config.logging.access_log {
        return handler::handle_request(req, state).await;
    }

    let started = Instant::now();
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_string(&req, REFERER);
    entry.user_agent = header_string(&req, USER_AGENT);

    let format = state.config.logging.access_log_format;
    let resp = handler::handle_request(req, state).await?;

    entry.status = resp.status().as_u16();
    entry.body_bytes = resp.body().size_hint().exact();
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry, format);

    Ok(resp)
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
