//! Orchestrator configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the render orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Path of the static HTML template produced by the build.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Path of the asset manifest produced by the build.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,

    /// Directory with one `<key>.json` locale bundle per supported locale.
    /// When unset the built-in bundles are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales_dir: Option<PathBuf>,

    /// Locale key used when negotiation finds no match.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Locale keys offered to clients. Empty offers every loaded bundle.
    #[serde(default)]
    pub supported_locales: Vec<String>,

    /// Name of the cookie carrying the user identity.
    #[serde(default = "default_auth_cookie")]
    pub auth_cookie: String,

    /// Preload phase settings.
    #[serde(default)]
    pub preload: PreloadConfig,

    /// Deadline for a whole render, in milliseconds (0 disables it).
    #[serde(default = "default_render_deadline_ms")]
    pub render_deadline_ms: u64,
}

impl OrchestratorConfig {
    /// Render deadline, `None` when disabled.
    pub fn render_deadline(&self) -> Option<Duration> {
        (self.render_deadline_ms > 0).then(|| Duration::from_millis(self.render_deadline_ms))
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            manifest_path: default_manifest_path(),
            locales_dir: None,
            default_locale: default_locale(),
            supported_locales: Vec::new(),
            auth_cookie: default_auth_cookie(),
            preload: PreloadConfig::default(),
            render_deadline_ms: default_render_deadline_ms(),
        }
    }
}

/// Preload phase configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// Swallow preload failures and keep rendering.
    #[serde(default = "default_true")]
    pub continue_on_error: bool,

    /// Per-preload timeout in milliseconds (0 disables it).
    #[serde(default = "default_preload_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on collect-and-settle passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

impl PreloadConfig {
    /// Per-preload timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            timeout_ms: default_preload_timeout_ms(),
            max_passes: default_max_passes(),
        }
    }
}

fn default_template_path() -> PathBuf {
    PathBuf::from("build/view/index.html")
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("build/asset-manifest.json")
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_auth_cookie() -> String {
    "mywebsite".to_string()
}

fn default_render_deadline_ms() -> u64 {
    10_000
}

fn default_preload_timeout_ms() -> u64 {
    5_000
}

fn default_max_passes() -> usize {
    4
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.auth_cookie, "mywebsite");
        assert_eq!(config.default_locale, "en");
        assert!(config.preload.continue_on_error);
        assert_eq!(config.preload.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.render_deadline(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: OrchestratorConfig = toml::from_str(
            r#"
            template_path = "dist/index.html"

            [preload]
            continue_on_error = false
            timeout_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.template_path, PathBuf::from("dist/index.html"));
        assert_eq!(config.manifest_path, PathBuf::from("build/asset-manifest.json"));
        assert!(!config.preload.continue_on_error);
        assert_eq!(config.preload.timeout(), None);
        assert_eq!(config.preload.max_passes, 4);
    }

    #[test]
    fn test_zero_render_deadline_disables_it() {
        let config: OrchestratorConfig = toml::from_str("render_deadline_ms = 0").unwrap();
        assert_eq!(config.render_deadline(), None);
    }
}
