//! Build asset manifest.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Error loading the asset manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read asset manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid asset manifest: {0}")]
    InvalidShape(String),
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Key as written in the manifest (e.g. `ProfilePage.js`).
    pub key: String,
    /// Key with the `.js` extension stripped.
    pub logical_name: String,
    /// Physical path of the emitted file.
    pub path: String,
}

/// Logical chunk name to physical path mapping.
///
/// Loaded once at startup; there is no way to mutate it after construction,
/// so it can be shared across request tasks behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    entries: Vec<ManifestEntry>,
}

impl AssetManifest {
    /// Load a manifest file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a manifest document.
    ///
    /// Both the flat `{ "main.js": "/static/js/main.js" }` shape and the
    /// nested `{ "files": { ... } }` shape are accepted. Entry order follows
    /// the document.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(json)?;
        let root = value
            .as_object()
            .ok_or_else(|| ManifestError::InvalidShape("root must be an object".into()))?;

        let files = match root.get("files") {
            Some(Value::Object(files)) => files,
            Some(_) => {
                return Err(ManifestError::InvalidShape(
                    "`files` must be an object".into(),
                ))
            }
            None => root,
        };

        Ok(Self::from_map(files))
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let mut manifest = Self::default();
        for (key, value) in map {
            // Non-string values (e.g. `entrypoints` arrays) are not chunks.
            if let Value::String(path) = value {
                manifest.push(key.clone(), path.clone());
            }
        }
        manifest
    }

    /// Build a manifest from `(key, path)` pairs, in order.
    pub fn from_entries<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let mut manifest = Self::default();
        for (key, path) in entries {
            manifest.push(key.into(), path.into());
        }
        manifest
    }

    fn push(&mut self, key: String, path: String) {
        let logical_name = logical_name(&key).to_string();
        // First entry wins for a duplicated logical name.
        if self.get(&logical_name).is_some() {
            return;
        }
        self.entries.push(ManifestEntry {
            key,
            logical_name,
            path,
        });
    }

    /// Look up an entry by logical name.
    pub fn get(&self, logical_name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.logical_name == logical_name)
    }

    /// Entries in manifest order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip a trailing `.js` from a manifest key.
pub fn logical_name(key: &str) -> &str {
    key.strip_suffix(".js").unwrap_or(key)
}
