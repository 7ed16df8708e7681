//! Script tags for touched code-split modules.

use std::fmt;

use ssr_core::escape_attr;

use crate::{AssetManifest, ModuleCollector};

/// An executable script reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    /// Root-relative script URL with exactly one leading slash.
    pub src: String,
}

impl ScriptTag {
    /// Create a script tag, normalising the leading slash.
    pub fn new(path: &str) -> Self {
        Self {
            src: format!("/{}", path.trim_start_matches('/')),
        }
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<script type="text/javascript" src="{}"></script>"#,
            escape_attr(&self.src)
        )
    }
}

/// Script tags for every manifest entry whose logical name was touched.
///
/// Output follows manifest order; untouched entries and touched modules
/// without an entry produce nothing.
pub fn resolve_scripts(manifest: &AssetManifest, touched: &ModuleCollector) -> Vec<ScriptTag> {
    manifest
        .entries()
        .iter()
        .filter(|entry| touched.contains(&entry.logical_name))
        .map(|entry| ScriptTag::new(&entry.path))
        .collect()
}
