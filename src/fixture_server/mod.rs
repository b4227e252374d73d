//! All bits and pieces concerning the fixture HTTP server are in this module.
//!
//! `server::FixtureServer` is the handle held by test code; the `hyper`
//! sub-module defines the accept loop running in the background on behalf of
//! each `FixtureServer`. Routes are attached up-front through
//! `builder::FixtureServerBuilder`.
mod builder;
mod hyper;
mod server;

pub use builder::FixtureServerBuilder;
pub use server::FixtureServer;
