//! Document head collected during render.

use ssr_core::{escape_attr, escape_text};

/// A single `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    /// Attribute pairs in insertion order.
    pub attributes: Vec<(String, String)>,
}

impl MetaTag {
    /// `<meta name=".." content="..">`.
    pub fn name(name: &str, content: &str) -> Self {
        Self {
            attributes: vec![
                ("name".to_string(), name.to_string()),
                ("content".to_string(), content.to_string()),
            ],
        }
    }

    /// `<meta property=".." content="..">`.
    pub fn property(property: &str, content: &str) -> Self {
        Self {
            attributes: vec![
                ("property".to_string(), property.to_string()),
                ("content".to_string(), content.to_string()),
            ],
        }
    }

    fn key(&self) -> Option<&(String, String)> {
        self.attributes
            .iter()
            .find(|(k, _)| k == "name" || k == "property" || k == "charset")
    }

    /// Render to HTML.
    pub fn render(&self) -> String {
        let mut html = String::from("<meta");
        for (k, v) in &self.attributes {
            html.push_str(&format!(r#" {}="{}""#, k, escape_attr(v)));
        }
        html.push('>');
        html
    }
}

/// Title, meta tags and `<html>` attributes set by rendered components.
///
/// Later writes win, so the most deeply nested component decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    title: Option<String>,
    meta: Vec<MetaTag>,
    html_attributes: Vec<(String, String)>,
}

impl Head {
    /// Create empty head content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Add a meta tag, replacing an earlier one with the same name/property.
    pub fn add_meta(&mut self, tag: MetaTag) {
        if let Some(key) = tag.key().cloned() {
            self.meta.retain(|m| m.key() != Some(&key));
        }
        self.meta.push(tag);
    }

    /// Set an attribute on the `<html>` element.
    pub fn set_html_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.html_attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.html_attributes.push((name, value)),
        }
    }

    /// The title, if one was set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Meta tags in order.
    pub fn meta(&self) -> &[MetaTag] {
        &self.meta
    }

    /// `<title>` element, if a title was set.
    pub fn title_tag(&self) -> Option<String> {
        self.title
            .as_ref()
            .map(|t| format!("<title>{}</title>", escape_text(t)))
    }

    /// All meta tags as HTML.
    pub fn meta_tags(&self) -> String {
        self.meta.iter().map(MetaTag::render).collect()
    }

    /// `<html>` attributes as `k="v"` pairs separated by spaces.
    pub fn html_attributes(&self) -> String {
        self.html_attributes
            .iter()
            .map(|(k, v)| format!(r#"{}="{}""#, k, escape_attr(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_escaped() {
        let mut head = Head::new();
        head.set_title("Tom & Jerry <3");
        assert_eq!(
            head.title_tag().unwrap(),
            "<title>Tom &amp; Jerry &lt;3</title>"
        );
    }

    #[test]
    fn test_meta_dedup_by_name() {
        let mut head = Head::new();
        head.add_meta(MetaTag::name("description", "outer"));
        head.add_meta(MetaTag::property("og:title", "x"));
        head.add_meta(MetaTag::name("description", "inner"));

        assert_eq!(
            head.meta_tags(),
            r#"<meta property="og:title" content="x"><meta name="description" content="inner">"#
        );
    }

    #[test]
    fn test_html_attributes() {
        let mut head = Head::new();
        head.set_html_attribute("lang", "en");
        head.set_html_attribute("dir", "ltr");
        head.set_html_attribute("lang", "zh");
        assert_eq!(head.html_attributes(), r#"lang="zh" dir="ltr""#);
    }

    #[test]
    fn test_empty_head() {
        let head = Head::new();
        assert!(head.title_tag().is_none());
        assert!(head.meta_tags().is_empty());
        assert!(head.html_attributes().is_empty());
    }
}
