//! Server settings.
//!
//! Read from `ssr.toml`; command line flags override individual values.
//!
//! ```toml
//! listen = "0.0.0.0:3000"
//!
//! [logging]
//! format = "json"
//! level = "info"
//!
//! [render]
//! template_path = "build/view/index.html"
//! manifest_path = "build/asset-manifest.json"
//! auth_cookie = "mywebsite"
//!
//! [render.preload]
//! timeout_ms = 3000
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ssr_core::OrchestratorConfig;

use crate::ServerError;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "ssr.toml";

/// Top-level server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Render orchestration settings.
    #[serde(default)]
    pub render: OrchestratorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            logging: LoggingSettings::default(),
            render: OrchestratorConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `ssr.toml` is used when
    /// present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ServerError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a settings file.
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path).map_err(|source| ServerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ServerError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    #[default]
    Human,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.listen.port(), 3000);
        assert_eq!(settings.logging.format, LogFormat::Human);
        assert_eq!(settings.render.auth_cookie, "mywebsite");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssr.toml");
        std::fs::write(
            &path,
            r#"
            listen = "0.0.0.0:8080"

            [logging]
            format = "json"

            [render]
            default_locale = "zh"
            supported_locales = ["en", "zh"]

            [render.preload]
            max_passes = 2
            "#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.listen.port(), 8080);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.render.default_locale, "zh");
        assert_eq!(settings.render.supported_locales, vec!["en", "zh"]);
        assert_eq!(settings.render.preload.max_passes, 2);
        assert!(settings.render.preload.continue_on_error);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ServerError::Io { .. }));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssr.toml");
        std::fs::write(&path, "listen = 12").unwrap();
        assert!(matches!(
            Settings::load(Some(&path)).unwrap_err(),
            ServerError::Settings { .. }
        ));
    }
}
