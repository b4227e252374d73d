use crate::fixture_server::FixtureServer;
use crate::handler::Handler;
use crate::method_filter::MethodFilter;
use crate::route_set::RouteSet;
use crate::serve_file::ServeFile;
use http::Method;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

/// A builder providing a fluent API to assemble a [`FixtureServer`]
/// step-by-step.
/// Use [`FixtureServer::builder`] to get started.
///
/// Every registration method binds exactly one URL path. The calls compose
/// in any order; only when the same path is registered twice does order
/// matter, and then the last registration wins.
pub struct FixtureServerBuilder {
    routes: RouteSet,
    listener: Option<TcpListener>,
}

impl FixtureServerBuilder {
    pub(super) fn new() -> Self {
        Self {
            routes: RouteSet::new(),
            listener: None,
        }
    }

    /// Serve the file at `file_path` for requests to `url_path`.
    ///
    /// The file is read when a request arrives, not now: content written to
    /// it after the server started is what later requests receive. A file
    /// that is missing at request time yields a 404.
    ///
    /// ### Example:
    /// ```rust
    /// use http_fixtures::FixtureServer;
    /// use std::io::Write;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     // Arrange
    ///     let mut file = tempfile::NamedTempFile::new().unwrap();
    ///     file.write_all(b"Lorem ipsum dolor sit amet").unwrap();
    ///
    ///     let server = FixtureServer::builder()
    ///         .serve_file("/data", file.path())
    ///         .start()
    ///         .await;
    ///
    ///     // Act
    ///     let response = reqwest::get(format!("{}/data", server.uri())).await.unwrap();
    ///
    ///     // Assert
    ///     assert_eq!(response.status(), 200);
    ///     assert_eq!(response.text().await.unwrap(), "Lorem ipsum dolor sit amet");
    /// }
    /// ```
    pub fn serve_file(mut self, url_path: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        self.routes
            .register(url_path, Arc::new(ServeFile::new(file_path)));
        self
    }

    /// Bind a custom [`Handler`] to `url_path`, answering requests of any
    /// HTTP method.
    ///
    /// [`Handler`]: crate::Handler
    pub fn handle<H>(self, url_path: impl Into<String>, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.handle_methods(url_path, handler, std::iter::empty())
    }

    /// Bind a custom [`Handler`] to `url_path`, restricted to the given HTTP
    /// methods.
    ///
    /// A request to `url_path` with a method outside the list is answered
    /// with a 404 and an empty body - the same response an unregistered path
    /// gets. An empty method list places no restriction at all, making this
    /// equivalent to [`handle`].
    ///
    /// [`Handler`]: crate::Handler
    /// [`handle`]: FixtureServerBuilder::handle
    pub fn handle_methods<H, M>(
        mut self,
        url_path: impl Into<String>,
        handler: H,
        methods: M,
    ) -> Self
    where
        H: Handler + 'static,
        M: IntoIterator<Item = Method>,
    {
        let handler = MethodFilter::wrap(Arc::new(handler), methods.into_iter().collect());
        self.routes.register(url_path, handler);
        self
    }

    /// Each instance of [`FixtureServer`] is, by default, running on a random
    /// port available on your local machine.
    /// With `FixtureServerBuilder::listener` you can choose to start the
    /// `FixtureServer` instance on a specific port you have already bound.
    ///
    /// ### Example:
    /// ```rust
    /// use http_fixtures::FixtureServer;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     // Arrange
    ///     let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    ///     let expected_server_address = listener
    ///         .local_addr()
    ///         .expect("Failed to get server address.");
    ///
    ///     // Act
    ///     let server = FixtureServer::builder().listener(listener).start().await;
    ///
    ///     // Assert
    ///     assert_eq!(&expected_server_address, server.address());
    /// }
    /// ```
    pub fn listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Finalise the builder and launch the [`FixtureServer`] instance!
    pub async fn start(self) -> FixtureServer {
        FixtureServer::start(self.routes, self.listener).await
    }
}
