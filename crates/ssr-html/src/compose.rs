//! Fragment injection.

use regex::NoExpand;

use crate::{Template, HEAD_CLOSE, HTML_OPEN, ROOT_MOUNT};

/// Everything a render computed for one document.
///
/// `state_json` and `intl_json` must already be escaped for embedding
/// (see `serialize_state`).
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    /// Attributes for the `<html>` tag, e.g. `lang="en"`.
    pub html_attributes: String,
    /// Rendered `<title>` element. `None` keeps the template's title.
    pub title: Option<String>,
    /// Rendered meta tags.
    pub meta: String,
    /// Rendered body markup.
    pub body: String,
    /// Hydration state.
    pub state_json: String,
    /// Hydration locale block.
    pub intl_json: String,
    /// Script tags, in load order.
    pub scripts: Vec<String>,
}

/// Inject fragments into the template.
///
/// Each marker is replaced once, except the title which replaces every
/// `<title>…</title>` in the shell.
pub fn compose(template: &Template, fragments: &Fragments) -> String {
    let mut html = template.as_str().to_string();

    if !fragments.html_attributes.is_empty() {
        html = html.replacen(
            HTML_OPEN,
            &format!("<html {}>", fragments.html_attributes),
            1,
        );
    }

    if let Some(title) = &fragments.title {
        html = template
            .title_pattern()
            .replace_all(&html, NoExpand(title.as_str()))
            .into_owned();
    }

    html = html.replacen(HEAD_CLOSE, &format!("{}{}", fragments.meta, HEAD_CLOSE), 1);

    let mount = format!(
        r#"<div id="root">{}</div><script>window.__PRELOADED_STATE__ = {}</script><script>window.__INTL_CONFIG__ = {}</script>{}"#,
        fragments.body,
        fragments.state_json,
        fragments.intl_json,
        fragments.scripts.concat()
    );
    html.replacen(ROOT_MOUNT, &mount, 1)
}
