use http::{HeaderMap, Method};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use url::Url;

/// An incoming request to a [`FixtureServer`].
///
/// Each [`Handler`] gets an immutable reference to a `Request` instance in its
/// [`handle`] method.
///
/// [`FixtureServer`]: crate::FixtureServer
/// [`Handler`]: crate::Handler
/// [`handle`]: crate::Handler::handle
///
/// ### Implementation notes:
/// We can't hand `hyper`'s own request type to handlers: extracting the body
/// consumes it, which would force every handler to deal with body streaming.
/// We perform the extraction once when the request arrives at the fixture
/// server, store the result and pass an immutable reference to the handler
/// matched by the route table.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Request {
    /// Deserialize the request body as JSON.
    pub fn body_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub(crate) async fn from_hyper(request: hyper::Request<hyper::body::Incoming>) -> Request {
        let (parts, body) = request.into_parts();
        let url = match parts.uri.authority() {
            Some(_) => parts.uri.to_string(),
            None => format!("http://localhost{}", parts.uri),
        }
        .parse()
        .unwrap();

        let body = body
            .collect()
            .await
            .expect("Failed to read request body.")
            .to_bytes();

        Self {
            url,
            method: parts.method,
            headers: parts.headers,
            body: body.to_vec(),
        }
    }
}
