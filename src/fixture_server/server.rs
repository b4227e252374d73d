use crate::client::Client;
use crate::fixture_server::hyper::run_server;
use crate::fixture_server::FixtureServerBuilder;
use crate::route_set::RouteSet;
use log::{debug, error};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// An HTTP web-server running in the background to stand in for one of your
/// dependencies during a test.
///
/// Each instance of `FixtureServer` is fully isolated: [`start`] binds a
/// random port available on your local machine which is assigned to the new
/// `FixtureServer`. Create one instance per test; when it goes out of scope
/// the background server shuts down and frees its port.
///
/// Routes are attached before start through [`FixtureServer::builder`]; once
/// the server is listening they cannot change.
///
/// ```rust
/// use http::Response;
/// use http_body_util::Full;
/// use http_fixtures::{FixtureServer, Request};
/// use hyper::body::Bytes;
///
/// #[tokio::main]
/// async fn main() {
///     let server = FixtureServer::builder()
///         .handle("/ping", |_: &Request| {
///             Response::new(Full::new(Bytes::from("pong")))
///         })
///         .start()
///         .await;
///
///     let response = reqwest::get(format!("{}/ping", server.uri())).await.unwrap();
///     assert_eq!(response.status(), 200);
/// }
/// ```
///
/// [`start`]: crate::FixtureServerBuilder::start
pub struct FixtureServer {
    address: SocketAddr,
    client: Client,
    fault: watch::Receiver<Option<String>>,
    serve_loop: Option<JoinHandle<()>>,
    // When `shutdown_trigger` gets dropped the listening server terminates.
    shutdown_trigger: Option<oneshot::Sender<()>>,
}

impl FixtureServer {
    /// Configure the routes of a new `FixtureServer`, to then [`start`] it.
    ///
    /// [`start`]: crate::FixtureServerBuilder::start
    pub fn builder() -> FixtureServerBuilder {
        FixtureServerBuilder::new()
    }

    /// Bind the listener and launch the accept loop as a background task.
    ///
    /// Failing to bind is a test-infrastructure fault with no recovery path,
    /// so it aborts fixture construction outright.
    pub(crate) async fn start(
        routes: RouteSet,
        listener: Option<std::net::TcpListener>,
    ) -> FixtureServer {
        let listener = listener.unwrap_or_else(|| {
            std::net::TcpListener::bind("127.0.0.1:0")
                .expect("Failed to bind an OS port for a fixture server.")
        });
        listener
            .set_nonblocking(true)
            .expect("Failed to put the fixture server listener in non-blocking mode.");
        let listener = tokio::net::TcpListener::from_std(listener)
            .expect("Failed to hand the fixture server listener to the tokio runtime.");
        let address = listener
            .local_addr()
            .expect("Failed to get the fixture server address.");

        let (shutdown_trigger, shutdown_receiver) = oneshot::channel();
        let (fault_reporter, fault) = watch::channel::<Option<String>>(None);
        let routes = Arc::new(routes);
        let serve_loop = tokio::spawn(async move {
            // The accept loop terminating on its own is a real malfunction,
            // not a test artifact. It gets reported rather than swallowed:
            // a silently dead fixture turns into confusing failures in
            // whatever assertions run next.
            if let Err(e) = run_server(listener, routes, shutdown_receiver).await {
                error!("Fixture server failed: {}", e);
                let _ = fault_reporter.send(Some(e.to_string()));
            }
        });

        FixtureServer {
            address,
            client: Client::new(address),
            fault,
            serve_loop: Some(serve_loop),
            shutdown_trigger: Some(shutdown_trigger),
        }
    }

    /// Stop the server: release the listener, stop accepting connections and
    /// drop whatever connections are still open. Requests racing the
    /// teardown are terminated abruptly.
    ///
    /// Waits for the background task to wind down, which is quick - the
    /// accept loop reacts to the signal as soon as it is delivered. Dropping
    /// the `FixtureServer` triggers the same teardown without waiting, so
    /// calling `shutdown` is only needed when the test wants the port to be
    /// provably closed before moving on.
    pub async fn shutdown(mut self) {
        if let Some(trigger) = self.shutdown_trigger.take() {
            let _ = trigger.send(());
        }
        if let Some(serve_loop) = self.serve_loop.take() {
            let _ = serve_loop.await;
        }
        self.report_fault();
    }

    /// Return the base uri of this running instance of `FixtureServer`, e.g.
    /// `http://127.0.0.1:4372`.
    ///
    /// Use this method to compose uris when interacting with this instance
    /// via an HTTP client of your own.
    pub fn uri(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Return the socket address of this running instance of
    /// `FixtureServer`, e.g. `127.0.0.1:4372`.
    pub fn address(&self) -> &SocketAddr {
        &self.address
    }

    /// An HTTP client pre-wired to reach this server: every request issued
    /// through it is redirected to the server's bound address no matter what
    /// host its URL names. See [`Client`].
    ///
    /// [`Client`]: crate::Client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// If the background server terminated with an unexpected error, return
    /// its message.
    ///
    /// `shutdown` and `Drop` already panic when a fault was recorded; this
    /// accessor is for hosts that prefer to observe the failure and choose
    /// their own policy.
    pub fn fault(&self) -> Option<String> {
        self.fault.borrow().clone()
    }

    fn report_fault(&self) {
        if let Some(fault) = self.fault.borrow().as_ref() {
            if std::thread::panicking() {
                debug!("Fixture server failed: {}", fault);
            } else {
                panic!("Fixture server failed: {}", fault);
            }
        }
    }
}

impl Drop for FixtureServer {
    // Clean up when the `FixtureServer` instance goes out of scope.
    fn drop(&mut self) {
        self.report_fault();
        // The sender half of the channel, `shutdown_trigger`, gets dropped
        // here, stopping the accept loop and releasing the listener.
    }
}
