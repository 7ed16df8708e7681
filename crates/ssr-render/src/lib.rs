//! Server render pipeline.
//!
//! This crate renders a component tree against a request-scoped store:
//! - `Component` / `Preload` - Interface of the application's view tree
//! - `RenderScope` - What a component sees while rendering
//! - `Router`, `Loadable`, `Redirect` - Routing, code-split capture, navigation
//! - `RenderPipeline` - Preload phase followed by the final render
//! - `RenderOutcome` / `check_redirect` - Markup or navigation, never both
//!
//! # Example
//!
//! ```rust,ignore
//! let root = Router::new()
//!     .route("/", Loadable::new("HomePage", HomePage))
//!     .route("/private", Redirect::to("/login"));
//!
//! let pipeline = RenderPipeline::new(Arc::new(root), PreloadPolicy::default());
//! match pipeline.render(&mut store, &bundle).await? {
//!     RenderOutcome::Redirect { location } => { /* 302 */ }
//!     RenderOutcome::Rendered(page) => { /* compose page.markup */ }
//! }
//! ```

mod component;
mod error;
mod head;
mod outcome;
mod pipeline;
mod preload;
mod router;
mod scope;

pub use component::*;
pub use error::*;
pub use head::*;
pub use outcome::*;
pub use pipeline::*;
pub use preload::*;
pub use router::*;
pub use scope::*;
