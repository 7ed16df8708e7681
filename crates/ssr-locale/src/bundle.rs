//! A single locale bundle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Messages and formatting configuration for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleBundle {
    /// BCP 47 tag (e.g. "en-US").
    pub locale: String,
    /// Message key to template string.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
    /// Opaque regional configuration for the component library.
    #[serde(default)]
    pub format_locale: serde_json::Value,
}

impl LocaleBundle {
    /// Create an empty bundle for a locale tag.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: BTreeMap::new(),
            format_locale: serde_json::Value::Null,
        }
    }

    /// Add a message.
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Set the component-library formatting locale.
    pub fn with_format_locale(mut self, format_locale: serde_json::Value) -> Self {
        self.format_locale = format_locale;
        self
    }

    /// Raw message template.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(|s| s.as_str())
    }

    /// Format a message, substituting `{name}` placeholders.
    ///
    /// Unknown keys format to the key itself; unknown placeholders are left
    /// untouched.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.message(key) else {
            return key.to_string();
        };

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let name = &after[..close];
                    match args.iter().find(|(k, _)| *k == name) {
                        Some((_, value)) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> LocaleBundle {
        LocaleBundle::new("en-US")
            .with_message("greeting", "Hello, {name}!")
            .with_message("pair", "{a} and {b}")
            .with_message("broken", "open {brace")
    }

    #[test]
    fn test_format_substitutes() {
        assert_eq!(bundle().format("greeting", &[("name", "alice")]), "Hello, alice!");
        assert_eq!(bundle().format("pair", &[("b", "2"), ("a", "1")]), "1 and 2");
    }

    #[test]
    fn test_format_missing_arg_kept() {
        assert_eq!(bundle().format("greeting", &[]), "Hello, {name}!");
    }

    #[test]
    fn test_format_unknown_key() {
        assert_eq!(bundle().format("nope", &[]), "nope");
    }

    #[test]
    fn test_format_unclosed_brace() {
        assert_eq!(bundle().format("broken", &[("brace", "x")]), "open {brace");
    }

    #[test]
    fn test_deserialize_defaults() {
        let bundle: LocaleBundle = serde_json::from_str(r#"{ "locale": "fr-FR" }"#).unwrap();
        assert!(bundle.messages.is_empty());
        assert!(bundle.format_locale.is_null());
    }
}
