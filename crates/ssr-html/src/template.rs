//! Static HTML shell.

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// Opening `<html>` tag that receives computed attributes.
pub const HTML_OPEN: &str = "<html>";
/// End of the document head; meta tags are inserted before it.
pub const HEAD_CLOSE: &str = "</head>";
/// Root mount placeholder replaced by the rendered body.
pub const ROOT_MOUNT: &str = r#"<div id="root"></div>"#;

const TITLE_PATTERN: &str = "(?s)<title>.*?</title>";

/// Template errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template does not have the expected shape.
    #[error("invalid template: {0}")]
    Invalid(String),

    /// The title pattern failed to compile.
    #[error("title pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A validated HTML shell.
///
/// Holds exactly one `<html>` tag, a `<title>…</title>` pair, a `</head>`
/// and exactly one root mount placeholder.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    title: Regex,
}

impl Template {
    /// Validate template markup.
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();

        expect_count(&source, HTML_OPEN, 1)?;
        expect_count(&source, ROOT_MOUNT, 1)?;
        if !source.contains(HEAD_CLOSE) {
            return Err(TemplateError::Invalid(format!("missing {}", HEAD_CLOSE)));
        }
        let title = Regex::new(TITLE_PATTERN)?;
        if !title.is_match(&source) {
            return Err(TemplateError::Invalid(
                "missing <title>…</title> pair".to_string(),
            ));
        }

        Ok(Self { source, title })
    }

    /// Read and validate a template file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        Self::parse(source)
    }

    /// Read and validate a template file without blocking the runtime.
    ///
    /// The request path calls this on every request so a rebuilt client is
    /// picked up without a restart.
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| io_error(path, source))?;
        Self::parse(source)
    }

    /// Template markup.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Pattern matching the template's title element.
    pub(crate) fn title_pattern(&self) -> &Regex {
        &self.title
    }
}

fn io_error(path: &Path, source: std::io::Error) -> TemplateError {
    TemplateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn expect_count(source: &str, needle: &str, expected: usize) -> Result<(), TemplateError> {
    let found = source.matches(needle).count();
    if found == expected {
        Ok(())
    } else {
        Err(TemplateError::Invalid(format!(
            "expected {} occurrence(s) of {}, found {}",
            expected, needle, found
        )))
    }
}
