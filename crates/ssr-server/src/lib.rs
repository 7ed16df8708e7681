//! SSR orchestrator server.
//!
//! This crate turns HTTP requests into server-rendered documents:
//! - `Orchestrator` - Template, locale, store, render, redirect check, compose
//! - `emit` / `Emitted` - `ResponseOutcome` to HTTP response
//! - `router` - axum routes rendering every `GET` path
//! - `Settings` - `ssr.toml` plus command line overrides
//! - `telemetry` - tracing subscriber setup
//! - `app` - Demo application served by the binary

pub mod app;
mod emitter;
mod error;
mod orchestrator;
mod routes;
mod server;
mod settings;
pub mod telemetry;

pub use emitter::*;
pub use error::*;
pub use orchestrator::*;
pub use routes::*;
pub use server::*;
pub use settings::*;
