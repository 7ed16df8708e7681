//! Asset manifest resolution for code-split rendering.
//!
//! This crate provides:
//! - `AssetManifest` - Build-produced chunk name to script path mapping
//! - `ModuleCollector` - Ordered set of modules touched by a render
//! - `resolve_scripts` - Script tags for exactly the touched modules

mod collector;
mod manifest;
mod script;

pub use collector::*;
pub use manifest::*;
pub use script::*;
