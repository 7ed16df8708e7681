//! Render outcomes and redirect interception.

use ssr_assets::ModuleCollector;

use crate::Head;

/// Output of a render that did not navigate.
#[derive(Debug)]
pub struct RenderedPage {
    /// Body markup for the root mount element.
    pub markup: String,
    /// Code-split modules the page used.
    pub modules: ModuleCollector,
    /// Title, meta tags and `<html>` attributes.
    pub head: Head,
}

/// Result of a render: markup, or a navigation that replaces it.
#[derive(Debug)]
pub enum RenderOutcome {
    /// Normal render.
    Rendered(RenderedPage),
    /// A component navigated during render; the markup was discarded.
    Redirect {
        /// Target location.
        location: String,
    },
}

impl RenderOutcome {
    /// The rendered page, if the render did not navigate.
    pub fn into_page(self) -> Option<RenderedPage> {
        match self {
            Self::Rendered(page) => Some(page),
            Self::Redirect { .. } => None,
        }
    }
}

/// Redirect target of an outcome.
///
/// Must be checked before any other use of the outcome.
pub fn check_redirect(outcome: &RenderOutcome) -> Option<&str> {
    match outcome {
        RenderOutcome::Redirect { location } => Some(location),
        RenderOutcome::Rendered(_) => None,
    }
}
