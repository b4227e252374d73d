use crate::handler::Handler;
use crate::Request;
use http::{Response, StatusCode};
use http_body_util::Full;
use hyper::body::Bytes;
use log::debug;
use std::sync::Arc;

/// The route table of a fixture server: URL paths mapped to the handlers
/// answering for them. Populated while the server is being configured,
/// immutable once it starts serving.
pub(crate) struct RouteSet {
    routes: Vec<Route>,
}

struct Route {
    path: String,
    handler: Arc<dyn Handler>,
}

impl RouteSet {
    pub(crate) fn new() -> RouteSet {
        RouteSet { routes: vec![] }
    }

    /// Bind `handler` to `path`. Registering a path twice replaces the earlier
    /// handler - last write wins, no error.
    pub(crate) fn register(&mut self, path: impl Into<String>, handler: Arc<dyn Handler>) {
        let path = path.into();
        match self.routes.iter_mut().find(|route| route.path == path) {
            Some(route) => route.handler = handler,
            None => self.routes.push(Route { path, handler }),
        }
    }

    pub(crate) async fn handle_request(&self, request: Request) -> Response<Full<Bytes>> {
        debug!("Handling {} {}", request.method, request.url.path());
        match self.lookup(request.url.path()) {
            Some(handler) => handler.handle(&request).await,
            None => {
                debug!(
                    "Got request for unregistered path: {} {}",
                    request.method,
                    request.url.path()
                );
                not_found()
            }
        }
    }

    /// An exact match wins outright; failing that, a registered path ending in
    /// `/` matches every path below it, with the longest such prefix winning.
    fn lookup(&self, path: &str) -> Option<&Arc<dyn Handler>> {
        let mut subtree: Option<&Route> = None;
        for route in &self.routes {
            if route.path == path {
                return Some(&route.handler);
            }
            if route.path.ends_with('/')
                && path.starts_with(route.path.as_str())
                && subtree.map_or(true, |best| route.path.len() > best.path.len())
            {
                subtree = Some(route);
            }
        }
        subtree.map(|route| &route.handler)
    }
}

pub(crate) fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Full::new(Bytes::new()))
        .unwrap()
}
