//! Core abstractions for the SSR orchestrator.
//!
//! This crate provides the types shared by every stage of a render:
//! - `RenderRequest` - Immutable per-request input (url, cookies, locale key)
//! - `TimingContext` / `LifecyclePhase` - Request lifecycle tracking
//! - `ResponseOutcome` - Terminal outcome handed to the response emitter
//! - `OrchestratorConfig` - Deployment configuration
//! - `escape_text` / `escape_attr` - HTML escaping

mod config;
mod context;
mod escape;
mod lifecycle;
mod outcome;

pub use config::*;
pub use context::*;
pub use escape::*;
pub use lifecycle::*;
pub use outcome::*;
