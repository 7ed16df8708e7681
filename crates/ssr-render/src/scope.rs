//! Render scope handed to components.

use std::collections::HashSet;
use std::sync::Arc;

use ssr_assets::ModuleCollector;
use ssr_core::{escape_attr, escape_text};
use ssr_locale::LocaleBundle;
use ssr_store::{AppState, AuthState, Location};

use crate::{Component, Head, Preload, RenderError, RouteParams};

/// Whether the current pass may still register preloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Preload registrations are collected for the next settle step.
    Collect,
    /// Data is final; registrations are ignored.
    Final,
}

pub(crate) struct PendingPreload {
    pub preload: Arc<dyn Preload>,
    pub key: String,
    pub params: RouteParams,
}

/// Everything one render pass produced.
pub(crate) struct PassOutput {
    pub markup: String,
    pub modules: ModuleCollector,
    pub head: Head,
    pub navigation: Option<String>,
    pub pending: Vec<PendingPreload>,
}

/// The view a component has of the current render.
///
/// Provides read access to the store and locale bundle, and collects the
/// markup, touched modules, head tags, navigation and preload
/// registrations of one pass.
pub struct RenderScope<'a> {
    state: &'a AppState,
    bundle: &'a LocaleBundle,
    settled: &'a HashSet<String>,
    mode: RenderMode,
    out: String,
    modules: ModuleCollector,
    head: Head,
    navigation: Option<String>,
    pending: Vec<PendingPreload>,
    params: RouteParams,
}

impl<'a> RenderScope<'a> {
    /// Create a scope over a state snapshot and bundle.
    pub fn new(
        state: &'a AppState,
        bundle: &'a LocaleBundle,
        settled: &'a HashSet<String>,
        mode: RenderMode,
    ) -> Self {
        Self {
            state,
            bundle,
            settled,
            mode,
            out: String::new(),
            modules: ModuleCollector::new(),
            head: Head::new(),
            navigation: None,
            pending: Vec::new(),
            params: RouteParams::new(),
        }
    }

    /// Store state.
    pub fn state(&self) -> &AppState {
        self.state
    }

    /// Auth slice.
    pub fn auth(&self) -> &AuthState {
        &self.state.auth
    }

    /// Current location.
    pub fn location(&self) -> &Location {
        &self.state.router.location
    }

    /// Preloaded data by key.
    pub fn data(&self, key: &str) -> Option<&serde_json::Value> {
        self.state.data.get(key)
    }

    /// Locale bundle for this request.
    pub fn locale(&self) -> &LocaleBundle {
        self.bundle
    }

    /// Regional configuration for the component library.
    pub fn format_locale(&self) -> &serde_json::Value {
        &self.bundle.format_locale
    }

    /// Translate a message key.
    pub fn t(&self, key: &str) -> String {
        self.bundle.format(key, &[])
    }

    /// Translate a message key with arguments.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.bundle.format(key, args)
    }

    /// Current pass mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Append trusted HTML.
    pub fn write_raw(&mut self, html: &str) {
        self.out.push_str(html);
    }

    /// Append escaped text.
    pub fn text(&mut self, text: &str) {
        self.out.push_str(&escape_text(text));
    }

    /// Write an element with escaped attributes around rendered children.
    pub fn element<F>(&mut self, tag: &str, attrs: &[(&str, &str)], children: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Self) -> Result<(), RenderError>,
    {
        self.out.push('<');
        self.out.push_str(tag);
        for (k, v) in attrs {
            self.out.push_str(&format!(r#" {}="{}""#, k, escape_attr(v)));
        }
        self.out.push('>');
        children(self)?;
        self.out.push_str(&format!("</{}>", tag));
        Ok(())
    }

    /// Render a child component.
    pub fn render(&mut self, component: &dyn Component) -> Result<(), RenderError> {
        component.render(self)
    }

    /// Declare a data dependency.
    ///
    /// Returns `true` once the preload has settled and its data (if any) is
    /// in the store.
    pub fn preload(&mut self, preload: Arc<dyn Preload>) -> bool {
        let key = preload.key();
        if self.settled.contains(&key) {
            return true;
        }
        if self.mode == RenderMode::Collect && !self.pending.iter().any(|p| p.key == key) {
            self.pending.push(PendingPreload {
                preload,
                key,
                params: self.params.clone(),
            });
        }
        false
    }

    /// Record a code-split module as used by this page.
    pub fn capture_module(&mut self, module: &str) {
        self.modules.record(module);
    }

    /// Navigate away. The first navigation of a pass wins.
    pub fn redirect(&mut self, location: &str) {
        if self.navigation.is_none() {
            self.navigation = Some(location.to_string());
        }
    }

    /// Whether this pass has navigated.
    pub fn is_redirected(&self) -> bool {
        self.navigation.is_some()
    }

    /// Head content.
    pub fn head_mut(&mut self) -> &mut Head {
        &mut self.head
    }

    /// Parameters of the innermost matched route.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// A single route parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    /// Replace the route parameters, returning the previous ones.
    pub(crate) fn swap_params(&mut self, params: RouteParams) -> RouteParams {
        std::mem::replace(&mut self.params, params)
    }

    pub(crate) fn finish(self) -> PassOutput {
        PassOutput {
            markup: self.out,
            modules: self.modules,
            head: self.head,
            navigation: self.navigation,
            pending: self.pending,
        }
    }
}
