use crate::handler::Handler;
use crate::route_set::not_found;
use crate::Request;
use async_trait::async_trait;
use http::{Response, StatusCode};
use http_body_util::Full;
use hyper::body::Bytes;
use log::debug;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Serves the contents of a file on disk.
///
/// The file is read when a request comes in, not when the route is
/// registered: a fixture file rewritten after the server was configured is
/// served with its new contents.
pub(crate) struct ServeFile {
    path: PathBuf,
}

impl ServeFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> ServeFile {
        ServeFile { path: path.into() }
    }
}

#[async_trait]
impl Handler for ServeFile {
    async fn handle(&self, _request: &Request) -> Response<Full<Bytes>> {
        match tokio::fs::read(&self.path).await {
            Ok(contents) => Response::new(Full::new(Bytes::from(contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Fixture file {} does not exist", self.path.display());
                not_found()
            }
            Err(e) => {
                debug!("Failed to read fixture file {}: {}", self.path.display(), e);
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Full::new(Bytes::new()))
                    .unwrap()
            }
        }
    }
}
