#![allow(clippy::needless_doctest_main)]
//! `http-fixtures` provides ephemeral HTTP servers to perform black-box
//! testing of Rust applications that interact with third-party APIs.
//!
//! A fixture server binds static files or custom handlers to URL paths,
//! starts on an OS-assigned loopback port and hands back an HTTP client that
//! is pre-wired to reach it - regardless of the hostname your code puts in
//! its URLs.
//!
//! # Table of Contents
//! 1. [Getting started](#getting-started)
//! 2. [The redirected client](#the-redirected-client)
//! 3. [Test isolation](#test-isolation)
//! 4. [Runtime compatibility](#runtime-compatibility)
//!
//! ## Getting started
//! ```rust
//! use http::Response;
//! use http_body_util::{BodyExt, Full};
//! use http_fixtures::{FixtureServer, Request};
//! use hyper::body::Bytes;
//! use std::io::Write;
//!
//! #[tokio::main]
//! async fn main() {
//!     // A fixture file for the server to serve.
//!     let mut file = tempfile::NamedTempFile::new().unwrap();
//!     file.write_all(b"Lorem ipsum dolor sit amet").unwrap();
//!
//!     // Start a background HTTP server on a random local port, serving the
//!     // file at '/data' and a custom handler at '/greeting'.
//!     let server = FixtureServer::builder()
//!         .serve_file("/data", file.path())
//!         .handle("/greeting", |_: &Request| {
//!             Response::new(Full::new(Bytes::from("hello")))
//!         })
//!         .start()
//!         .await;
//!
//!     // Probe the server with any HTTP client, composing uris yourself...
//!     let body = reqwest::get(format!("{}/data", server.uri()))
//!         .await
//!         .unwrap()
//!         .text()
//!         .await
//!         .unwrap();
//!     assert_eq!(body, "Lorem ipsum dolor sit amet");
//!
//!     // ...or use the server's own client: whatever host the URL names,
//!     // the request is redirected to the fixture server.
//!     let response = server
//!         .client()
//!         .get("https://just.made.this.up.com/greeting")
//!         .await
//!         .unwrap();
//!     let body = response.into_body().collect().await.unwrap().to_bytes();
//!     assert_eq!(body.as_ref(), b"hello");
//!
//!     // Requests to unregistered paths get a 404.
//!     let status = reqwest::get(format!("{}/missing", server.uri()))
//!         .await
//!         .unwrap()
//!         .status();
//!     assert_eq!(status.as_u16(), 404);
//! }
//! ```
//!
//! ## The redirected client
//!
//! [`FixtureServer::client`] returns a [`Client`] whose requests always land
//! on the fixture server: the scheme and host of each outgoing request are
//! replaced with the server's bound address before the request is sent, while
//! path, query, method, headers and body are left untouched. Use it to
//! exercise code paths that hardcode external URLs without touching DNS or
//! the network.
//!
//! ## Test isolation
//!
//! Each instance of [`FixtureServer`] is fully isolated: starting one finds a
//! random port available on your local machine which is assigned to the new
//! server. Use one instance per test - when it goes out of scope the
//! background server shuts down and the port is freed. Call
//! [`FixtureServer::shutdown`] instead when a test needs the port to be
//! provably closed before it continues.
//!
//! ## Runtime compatibility
//!
//! The background server is spawned onto the ambient [`tokio`] runtime, so a
//! `FixtureServer` must be started from within one - `#[tokio::test]` and
//! `#[tokio::main]` both qualify.
//!
//! [`FixtureServer`]: struct.FixtureServer.html
//! [`FixtureServer::client`]: struct.FixtureServer.html#method.client
//! [`FixtureServer::shutdown`]: struct.FixtureServer.html#method.shutdown
//! [`Client`]: struct.Client.html
//! [`tokio`]: https://docs.rs/tokio/
mod client;
mod fixture_server;
mod handler;
mod method_filter;
mod request;
mod route_set;
mod serve_file;

pub use client::{Client, ClientError};
pub use fixture_server::{FixtureServer, FixtureServerBuilder};
pub use handler::Handler;
pub use request::Request;
