use http::uri::{Authority, PathAndQuery, Scheme};
use http::{Method, Request, Response, Uri};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::rt::TokioExecutor;
use std::net::SocketAddr;

/// Error type for requests issued through a fixture server's [`Client`].
#[derive(Debug)]
pub enum ClientError {
    /// Error building a request from its pieces.
    RequestBuild(String),
    /// Error from the underlying HTTP client. Round-trip failures (e.g. a
    /// connection refused after the fixture server stopped) surface here
    /// unchanged.
    Transport(hyper_util::client::legacy::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::RequestBuild(s) => write!(f, "Request build error: {}", s),
            ClientError::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::RequestBuild(_) => None,
            ClientError::Transport(e) => Some(e),
        }
    }
}

impl From<hyper_util::client::legacy::Error> for ClientError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        ClientError::Transport(err)
    }
}

/// An HTTP client that only talks to one fixture server.
///
/// Before a request leaves the client, its URI's scheme and authority are
/// replaced with the fixture server's own bound address; path, query, method,
/// headers and body pass through untouched. Test code can therefore point a
/// request at an arbitrary - even non-resolvable - hostname and still reach
/// the fixture, which is handy when exercising code paths that hardcode
/// external URLs.
///
/// Obtained from [`FixtureServer::client`]; cheap to clone and safe to share
/// across concurrent in-flight requests.
///
/// [`FixtureServer::client`]: crate::FixtureServer::client
#[derive(Clone)]
pub struct Client {
    http: HyperClient<HttpConnector, Full<Bytes>>,
    authority: Authority,
}

impl Client {
    pub(crate) fn new(address: SocketAddr) -> Client {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        Client {
            http: HyperClient::builder(TokioExecutor::new()).build(connector),
            authority: address
                .to_string()
                .parse()
                .expect("A socket address is a valid authority."),
        }
    }

    /// Send `request` to the fixture server, regardless of the host and
    /// scheme its URI names.
    pub async fn request(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<Incoming>, ClientError> {
        let (mut parts, body) = request.into_parts();
        parts.uri = self.redirect(parts.uri);
        let response = self.http.request(Request::from_parts(parts, body)).await?;
        Ok(response)
    }

    /// Issue a GET request for `uri`.
    pub async fn get(&self, uri: impl AsRef<str>) -> Result<Response<Incoming>, ClientError> {
        self.send(Method::GET, uri.as_ref(), Bytes::new()).await
    }

    /// Issue a POST request for `uri` carrying `body`.
    pub async fn post(
        &self,
        uri: impl AsRef<str>,
        body: impl Into<Bytes>,
    ) -> Result<Response<Incoming>, ClientError> {
        self.send(Method::POST, uri.as_ref(), body.into()).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Bytes,
    ) -> Result<Response<Incoming>, ClientError> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(body))
            .map_err(|e| ClientError::RequestBuild(e.to_string()))?;
        self.request(request).await
    }

    /// Rebuild `uri` around the fixture server's address, keeping its path
    /// and query.
    fn redirect(&self, uri: Uri) -> Uri {
        let mut parts = uri.into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).expect("A uri rebuilt around the fixture address is valid.")
    }
}
