//! Terminal outcomes of a render request.

/// Status code for a successful render.
pub const STATUS_OK: u16 = 200;
/// Status code for an in-render navigation.
pub const STATUS_FOUND: u16 = 302;
/// Status code for every fatal path.
pub const STATUS_NOT_FOUND: u16 = 404;

/// What the response emitter is asked to write.
///
/// Only template and render failures cross the request boundary as
/// failures; preload errors never reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The HTML template could not be read or is malformed.
    TemplateMissing,
    /// Markup production failed.
    RenderFailed,
    /// The render navigated; respond with a redirect to this location.
    Redirect(String),
    /// Fully composed HTML document.
    Success(String),
}

impl ResponseOutcome {
    /// HTTP status code for this outcome.
    pub fn status(&self) -> u16 {
        match self {
            Self::TemplateMissing | Self::RenderFailed => STATUS_NOT_FOUND,
            Self::Redirect(_) => STATUS_FOUND,
            Self::Success(_) => STATUS_OK,
        }
    }

    /// Whether this outcome is one of the fatal paths.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::TemplateMissing | Self::RenderFailed)
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TemplateMissing => "template_missing",
            Self::RenderFailed => "render_failed",
            Self::Redirect(_) => "redirect",
            Self::Success(_) => "success",
        }
    }
}
