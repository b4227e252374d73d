use crate::route_set::RouteSet;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use log::debug;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// The actual HTTP server dispatching incoming requests to the configured
/// routes.
///
/// Runs until the shutdown signal fires or the listener fails; only the
/// former is an `Ok` outcome. Errors raised while serving an individual
/// connection are not failures of the server: the peer hanging up
/// mid-exchange is its own business.
pub(super) async fn run_server(
    listener: TcpListener,
    routes: Arc<RouteSet>,
    mut shutdown_signal: oneshot::Receiver<()>,
) -> Result<(), std::io::Error> {
    let mut connections: Vec<JoinHandle<()>> = Vec::new();
    let outcome = loop {
        tokio::select! {
            // This branch resolves when either:
            // - the sender half of the channel gets dropped (i.e. the FixtureServer goes out of scope)
            // - the sender is used, therefore sending a poison pill willingly as a shutdown signal
            _ = &mut shutdown_signal => break Ok(()),
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => {
                    let routes = routes.clone();
                    connections.retain(|connection| !connection.is_finished());
                    connections.push(tokio::spawn(async move {
                        let service = service_fn(move |request: hyper::Request<hyper::body::Incoming>| {
                            let routes = routes.clone();
                            async move {
                                let request = crate::Request::from_hyper(request).await;
                                Ok::<_, Infallible>(routes.handle_request(request).await)
                            }
                        });
                        if let Err(e) = auto::Builder::new(TokioExecutor::new())
                            .serve_connection(TokioIo::new(stream), service)
                            .await
                        {
                            debug!("Connection error: {}", e);
                        }
                    }));
                }
                Err(e) => break Err(e),
            }
        }
    };

    // Keep-alive connections would otherwise keep answering after the
    // listener is gone.
    for connection in &connections {
        connection.abort();
    }
    outcome
}
