//! Component interface.

use std::sync::Arc;

use crate::{RenderError, RenderScope};

/// A node of the application's view tree.
///
/// Rendering writes markup into the scope and may register preloads,
/// capture code-split modules, set head tags or navigate.
pub trait Component: Send + Sync {
    /// Render this component into the scope.
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), RenderError>;
}

/// A component backed by a closure.
pub struct FnComponent<F> {
    f: F,
}

/// Build a component from a closure.
///
/// ```rust,ignore
/// let hello = from_fn(|scope| {
///     scope.text("hello");
///     Ok(())
/// });
/// ```
pub fn from_fn<F>(f: F) -> FnComponent<F>
where
    F: Fn(&mut RenderScope<'_>) -> Result<(), RenderError> + Send + Sync,
{
    FnComponent { f }
}

impl<F> Component for FnComponent<F>
where
    F: Fn(&mut RenderScope<'_>) -> Result<(), RenderError> + Send + Sync,
{
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
        (self.f)(scope)
    }
}

/// A code-split component.
///
/// Records its module name whenever it renders, so only the chunks the
/// page actually used are shipped.
pub struct Loadable {
    module: String,
    inner: Arc<dyn Component>,
}

impl Loadable {
    /// Wrap a component in a named code-split module.
    pub fn new(module: impl Into<String>, inner: impl Component + 'static) -> Self {
        Self {
            module: module.into(),
            inner: Arc::new(inner),
        }
    }

    /// Module name recorded on render.
    pub fn module(&self) -> &str {
        &self.module
    }
}

impl Component for Loadable {
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
        scope.capture_module(&self.module);
        self.inner.render(scope)
    }
}

/// Navigates to another location when rendered.
pub struct Redirect {
    location: String,
}

impl Redirect {
    /// Redirect to `location`.
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Component for Redirect {
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
        scope.redirect(&self.location);
        Ok(())
    }
}

/// Renders children in order.
#[derive(Default)]
pub struct Fragment {
    children: Vec<Arc<dyn Component>>,
}

impl Fragment {
    /// Create an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child.
    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Arc::new(child));
        self
    }
}

impl Component for Fragment {
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
        for child in &self.children {
            child.render(scope)?;
        }
        Ok(())
    }
}
