//! Path routing on top of the store's memory history.
//!
//! Patterns use `/product/:id` for parameters and `/docs/*rest` for a
//! trailing wildcard.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Component, RenderError, RenderScope};

/// Parameters extracted from a matched route.
pub type RouteParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    Wildcard(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/user/:id`.
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|s| {
                if let Some(name) = s.strip_prefix(':') {
                    Segment::Param(name.to_string())
                } else if let Some(name) = s.strip_prefix('*') {
                    Segment::Wildcard(name.to_string())
                } else {
                    Segment::Static(s.to_string())
                }
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a path, returning its parameters.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut params = RouteParams::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard(name) => {
                    params.insert(name.clone(), parts.get(i..).unwrap_or_default().join("/"));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    if parts.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i)?;
                    params.insert(name.clone(), (*value).to_string());
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Renders the first route matching the current location.
#[derive(Default)]
pub struct Router {
    routes: Vec<(RoutePattern, Arc<dyn Component>)>,
    fallback: Option<Arc<dyn Component>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Earlier routes take precedence.
    pub fn route(mut self, pattern: &str, component: impl Component + 'static) -> Self {
        self.routes
            .push((RoutePattern::parse(pattern), Arc::new(component)));
        self
    }

    /// Component rendered when no route matches.
    pub fn fallback(mut self, component: impl Component + 'static) -> Self {
        self.fallback = Some(Arc::new(component));
        self
    }

    /// Registered patterns in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(p, _)| p.as_str())
    }

    /// Find the component for a path.
    pub fn resolve(&self, path: &str) -> Option<(&dyn Component, RouteParams)> {
        self.routes
            .iter()
            .find_map(|(pattern, component)| {
                pattern
                    .matches(path)
                    .map(|params| (component.as_ref(), params))
            })
            .or_else(|| {
                self.fallback
                    .as_ref()
                    .map(|c| (c.as_ref(), RouteParams::new()))
            })
    }
}

impl Component for Router {
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
        let path = scope.location().pathname.clone();
        let Some((component, params)) = self.resolve(&path) else {
            return Ok(());
        };

        let previous = scope.swap_params(params);
        let result = component.render(scope);
        scope.swap_params(previous);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Redirect;

    #[test]
    fn test_static_match() {
        let pattern = RoutePattern::parse("/about");
        assert!(pattern.matches("/about").is_some());
        assert!(pattern.matches("/about/").is_some());
        assert!(pattern.matches("/about/team").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn test_root_match() {
        let pattern = RoutePattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/x").is_none());
    }

    #[test]
    fn test_param_match() {
        let params = RoutePattern::parse("/user/:id/posts/:post")
            .matches("/user/42/posts/7")
            .unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert_eq!(params.get("post").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_wildcard_match() {
        let pattern = RoutePattern::parse("/docs/*rest");
        let params = pattern.matches("/docs/a/b/c").unwrap();
        assert_eq!(params.get("rest").map(String::as_str), Some("a/b/c"));

        let params = pattern.matches("/docs").unwrap();
        assert_eq!(params.get("rest").map(String::as_str), Some(""));
    }

    #[test]
    fn test_first_route_wins_then_fallback() {
        let router = Router::new()
            .route("/a", Redirect::to("/first"))
            .route("/:any", Redirect::to("/second"))
            .fallback(Redirect::to("/404"));

        assert!(router.resolve("/a").is_some());
        assert_eq!(router.resolve("/b").unwrap().1.get("any").map(String::as_str), Some("b"));
        assert!(router.resolve("/x/y").unwrap().1.is_empty());
        assert_eq!(router.patterns().collect::<Vec<_>>(), vec!["/a", "/:any"]);
    }
}
