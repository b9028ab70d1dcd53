//! Per-request identity extraction.
//!
//! # Responsibilities
//! - Read `X-Request-ID` / `X-Correlation-ID` from inbound requests
//! - Generate a unique request ID when the caller supplied none
//! - Attach the resulting scope to the request as early as possible
//!
//! # Design Decisions
//! - The scope is an immutable bundle stored in request extensions; handlers
//!   receive it explicitly instead of consulting hidden global state
//! - Correlation IDs are pass-through only, never generated locally

use axum::http::{HeaderMap, Request};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use uuid::Uuid;

/// Inbound header carrying the per-request identifier.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Inbound header carrying the caller-supplied correlation identifier.
pub const X_CORRELATION_ID: &str = "x-correlation-id";

/// Immutable identity bundle for one request's processing scope.
///
/// `request_id` is always non-empty; `correlation_id` is present only when
/// the caller supplied one.
#[derive(Debug, Clone)]
pub struct RequestScope {
    request_id: String,
    correlation_id: Option<String>,
}

impl RequestScope {
    /// Build a scope from inbound request headers. Never fails: a missing or
    /// empty `X-Request-ID` yields a freshly generated UUID.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = match header_value(headers, X_REQUEST_ID) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        let correlation_id = header_value(headers, X_CORRELATION_ID).map(str::to_string);
        Self {
            request_id,
            correlation_id,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Middleware that attaches a [`RequestScope`] to every inbound request.
#[derive(Debug, Clone, Copy)]
pub struct RequestScopeLayer;

impl<S> Layer<S> for RequestScopeLayer {
    type Service = RequestScopeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestScopeService { inner }
    }
}

/// Service wrapper produced by [`RequestScopeLayer`].
#[derive(Debug, Clone)]
pub struct RequestScopeService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestScopeService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let scope = RequestScope::from_headers(req.headers());
        req.extensions_mut().insert(scope);
        self.inner.call(req)
    }
}
