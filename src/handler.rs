use crate::Request;
use async_trait::async_trait;
use http::Response;
use http_body_util::Full;
use hyper::body::Bytes;

/// Anything that implements `Handler` can be bound to a URL path on a
/// [`FixtureServer`] to reply to the requests reaching that path.
///
/// The easiest way to get a `Handler` is a closure taking a [`Request`]
/// reference and returning a response:
///
/// ```rust
/// use http::Response;
/// use http_body_util::Full;
/// use http_fixtures::{FixtureServer, Request};
/// use hyper::body::Bytes;
///
/// #[tokio::main]
/// async fn main() {
///     // Arrange
///     let server = FixtureServer::builder()
///         .handle("/greeting", |_: &Request| {
///             Response::new(Full::new(Bytes::from("hello")))
///         })
///         .start()
///         .await;
///
///     // Act
///     let response = reqwest::get(format!("{}/greeting", server.uri()))
///         .await
///         .unwrap();
///
///     // Assert
///     assert_eq!(response.status(), 200);
///     assert_eq!(response.text().await.unwrap(), "hello");
/// }
/// ```
///
/// Implement the trait directly when the reply requires I/O or state that a
/// plain closure cannot carry:
///
/// ```rust
/// use async_trait::async_trait;
/// use http::Response;
/// use http_body_util::Full;
/// use http_fixtures::{Handler, Request};
/// use hyper::body::Bytes;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// /// Replies with how many requests it has served so far.
/// struct Counter(AtomicU64);
///
/// #[async_trait]
/// impl Handler for Counter {
///     async fn handle(&self, _request: &Request) -> Response<Full<Bytes>> {
///         let served = self.0.fetch_add(1, Ordering::Relaxed) + 1;
///         Response::new(Full::new(Bytes::from(served.to_string())))
///     }
/// }
/// ```
///
/// Handlers may be invoked concurrently when overlapping connections hit the
/// same route, so any state they carry must be safe to share.
///
/// [`FixtureServer`]: crate::FixtureServer
/// [`Request`]: crate::Request
#[async_trait]
pub trait Handler: Send + Sync {
    /// Given a reference to the [`Request`] that reached this handler's path,
    /// return the response served back to the client.
    ///
    /// [`Request`]: crate::Request
    async fn handle(&self, request: &Request) -> Response<Full<Bytes>>;
}

#[async_trait]
impl<F> Handler for F
where
    F: Send + Sync + Fn(&Request) -> Response<Full<Bytes>>,
{
    async fn handle(&self, request: &Request) -> Response<Full<Bytes>> {
        (self)(request)
    }
}
