//! Render errors.

use thiserror::Error;

/// Errors that end a render.
///
/// Preload failures only appear here when the preload policy does not
/// continue on error.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A component failed to render.
    #[error("component error: {0}")]
    Component(String),

    /// A preload failed and the policy aborts on preload errors.
    #[error("preload '{key}' failed: {message}")]
    Preload { key: String, message: String },

    /// A component panicked while rendering.
    #[error("render panicked: {0}")]
    Panicked(String),
}

impl RenderError {
    /// Create a component error from any displayable value.
    pub fn component(message: impl std::fmt::Display) -> Self {
        Self::Component(message.to_string())
    }
}
