//! Server errors.

use std::path::PathBuf;

use ssr_assets::ManifestError;
use ssr_html::TemplateError;
use ssr_locale::LocaleError;
use thiserror::Error;

/// Errors raised while starting or running the server.
///
/// Request-level failures never appear here; they become a
/// `ResponseOutcome` and a 404.
#[derive(Error, Debug)]
pub enum ServerError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for `Settings`.
    #[error("invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The asset manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Locale bundles could not be loaded.
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// The HTML template is missing or malformed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The tracing subscriber could not be installed.
    #[error("telemetry: {0}")]
    Telemetry(String),

    /// Binding or serving failed.
    #[error("server: {0}")]
    Serve(#[from] std::io::Error),
}
