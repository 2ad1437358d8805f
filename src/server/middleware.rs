//! No-cache response middleware
//!
//! [`NoCache`] decorates any hyper service and stamps the no-cache headers on
//! every response it produces, whatever the status.

use hyper::service::Service;
use hyper::{Request, Response};
use std::future::Future;
use std::pin::Pin;

use crate::http::no_cache;

/// Service wrapper that marks every response uncacheable
#[derive(Debug, Clone, Copy)]
pub struct NoCache<S> {
    inner: S,
}

impl<S> NoCache<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for NoCache<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<ReqBody>) -> Self::Future {
        let fut = self.inner.call(req);
        Box::pin(async move {
            let mut resp = fut.await?;
            no_cache::apply(resp.headers_mut());
            Ok(resp)
        })
    }
}
