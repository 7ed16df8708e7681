//! HTML document composition.
//!
//! - `Template` - Validated static shell produced by the client build
//! - `Fragments` - Everything a render computed for one document
//! - `compose` - Textual injection of fragments into the template
//! - `serialize_state` - JSON for inline `<script>` blocks, safe to embed

mod compose;
mod embed;
mod template;

pub use compose::*;
pub use embed::*;
pub use template::*;
