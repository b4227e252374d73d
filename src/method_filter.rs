use crate::handler::Handler;
use crate::route_set::not_found;
use crate::Request;
use async_trait::async_trait;
use http::{Method, Response};
use http_body_util::Full;
use hyper::body::Bytes;
use std::sync::Arc;

/// Restricts a handler to an allow-list of HTTP methods.
///
/// A request whose method is not in the list gets the same 404 as an
/// unregistered path, not a 405: existing test suites lean on that status
/// code, so a rejected method stays indistinguishable from a missing route.
pub(crate) struct MethodFilter {
    inner: Arc<dyn Handler>,
    allowed: Vec<Method>,
}

impl MethodFilter {
    /// Wrap `handler` so it only answers for the `allowed` methods. An empty
    /// list means no restriction and leaves the handler untouched.
    pub(crate) fn wrap(handler: Arc<dyn Handler>, allowed: Vec<Method>) -> Arc<dyn Handler> {
        if allowed.is_empty() {
            handler
        } else {
            Arc::new(MethodFilter {
                inner: handler,
                allowed,
            })
        }
    }
}

#[async_trait]
impl Handler for MethodFilter {
    async fn handle(&self, request: &Request) -> Response<Full<Bytes>> {
        if self.allowed.contains(&request.method) {
            self.inner.handle(request).await
        } else {
            not_found()
        }
    }
}
