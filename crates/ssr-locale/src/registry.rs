//! Process-wide set of locale bundles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;

use crate::LocaleBundle;

/// Error loading or resolving locale bundles.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("failed to read locale data {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locale bundle '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported locale key: {0}")]
    Unsupported(String),

    #[error("no locale bundles found in {}", .0.display())]
    Empty(PathBuf),
}

/// Immutable locale key to bundle lookup.
///
/// Built once at startup. Bundles are behind `Arc` so a request can hold
/// its bundle without borrowing the registry.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    bundles: HashMap<String, Arc<LocaleBundle>>,
}

impl LocaleRegistry {
    /// Build a registry from `(key, bundle)` pairs.
    pub fn from_bundles<I, K>(bundles: I) -> Self
    where
        I: IntoIterator<Item = (K, LocaleBundle)>,
        K: Into<String>,
    {
        Self {
            bundles: bundles
                .into_iter()
                .map(|(k, b)| (k.into(), Arc::new(b)))
                .collect(),
        }
    }

    /// Load every `<key>.json` file in a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LocaleError> {
        let dir = dir.as_ref();
        let io_err = |source| LocaleError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut bundles = HashMap::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = std::fs::read_to_string(&path).map_err(|source| LocaleError::Io {
                path: path.clone(),
                source,
            })?;
            let bundle: LocaleBundle =
                serde_json::from_str(&content).map_err(|source| LocaleError::Parse {
                    key: key.to_string(),
                    source,
                })?;

            tracing::debug!(key, locale = %bundle.locale, messages = bundle.messages.len(), "loaded locale bundle");
            bundles.insert(key.to_string(), Arc::new(bundle));
        }

        if bundles.is_empty() {
            return Err(LocaleError::Empty(dir.to_path_buf()));
        }

        Ok(Self { bundles })
    }

    /// Built-in English and Chinese bundles.
    pub fn builtin() -> Self {
        let en = LocaleBundle::new("en-US")
            .with_message("app.title", "My Website")
            .with_message("app.description", "A server-rendered application")
            .with_message("home.welcome", "Welcome, {name}!")
            .with_message("home.guest", "Welcome! Please log in.")
            .with_message("nav.home", "Home")
            .with_message("nav.profile", "Profile")
            .with_message("nav.login", "Log in")
            .with_message("nav.logout", "Log out")
            .with_message("profile.title", "Profile")
            .with_message("login.title", "Log in")
            .with_message("notfound.title", "Page not found")
            .with_format_locale(json!({ "locale": "en" }));

        let zh = LocaleBundle::new("zh-CN")
            .with_message("app.title", "我的网站")
            .with_message("app.description", "服务端渲染应用")
            .with_message("home.welcome", "欢迎，{name}！")
            .with_message("home.guest", "欢迎！请先登录。")
            .with_message("nav.home", "首页")
            .with_message("nav.profile", "个人资料")
            .with_message("nav.login", "登录")
            .with_message("nav.logout", "退出")
            .with_message("profile.title", "个人资料")
            .with_message("login.title", "登录")
            .with_message("notfound.title", "页面不存在")
            .with_format_locale(json!({ "locale": "zh-cn" }));

        Self::from_bundles([("en", en), ("zh", zh)])
    }

    /// Resolve a locale key to its bundle.
    pub fn resolve(&self, key: &str) -> Result<Arc<LocaleBundle>, LocaleError> {
        self.bundles
            .get(key)
            .cloned()
            .ok_or_else(|| LocaleError::Unsupported(key.to_string()))
    }

    /// Whether a key has a bundle.
    pub fn contains(&self, key: &str) -> bool {
        self.bundles.contains_key(key)
    }

    /// Supported keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.bundles.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_resolves_en() {
        let registry = LocaleRegistry::builtin();
        let bundle = registry.resolve("en").unwrap();
        assert_eq!(bundle.locale, "en-US");
        assert_eq!(registry.keys(), vec!["en", "zh"]);
    }

    #[test]
    fn test_unknown_key() {
        let err = LocaleRegistry::builtin().resolve("xx").unwrap_err();
        assert!(matches!(err, LocaleError::Unsupported(key) if key == "xx"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fr.json"),
            r#"{ "locale": "fr-FR", "messages": { "hi": "Salut" } }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let registry = LocaleRegistry::load_dir(dir.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("fr").unwrap().message("hi"), Some("Salut"));
    }

    #[test]
    fn test_load_dir_empty() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocaleRegistry::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LocaleError::Empty(_)));
    }

    #[test]
    fn test_load_dir_missing_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("locales");
        let err = LocaleRegistry::load_dir(&missing).unwrap_err();
        assert!(matches!(&err, LocaleError::Io { path, .. } if *path == missing));
        assert!(err.to_string().contains("locales"));
    }

    #[test]
    fn test_load_dir_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "{").unwrap();
        let err = LocaleRegistry::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LocaleError::Parse { key, .. } if key == "en"));
    }

    #[test]
    fn test_shared_bundle_is_same_allocation() {
        let registry = LocaleRegistry::builtin();
        let a = registry.resolve("zh").unwrap();
        let b = registry.resolve("zh").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
