//! Request context for a single render.

use std::collections::BTreeMap;

/// Unique request identifier for tracing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from an existing ID string (e.g. an upstream `x-request-id`).
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request cookies, name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies(BTreeMap<String, String>);

impl Cookies {
    /// Create an empty cookie set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Insert a cookie, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a cookie by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    /// Number of cookies present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no cookies are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Cookies
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Immutable input for one render.
///
/// Built once at request start and only borrowed afterwards.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Unique request identifier.
    pub request_id: RequestId,
    /// Target URL (path plus optional query and fragment).
    pub url: String,
    /// Request cookies.
    pub cookies: Cookies,
    /// Locale key resolved by the upstream negotiator (e.g. "en").
    pub locale_key: String,
}

impl RenderRequest {
    /// Create a new render request with a fresh request ID.
    pub fn new(url: impl Into<String>, locale_key: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::generate(),
            url: url.into(),
            cookies: Cookies::new(),
            locale_key: locale_key.into(),
        }
    }

    /// Attach the request cookies.
    pub fn with_cookies(mut self, cookies: Cookies) -> Self {
        self.cookies = cookies;
        self
    }

    /// Use an explicit request ID.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Get a cookie value by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_request_id_from_string() {
        let id = RequestId::from_string("req-42");
        assert_eq!(id.to_string(), "req-42");
    }

    #[test]
    fn test_cookie_lookup() {
        let request = RenderRequest::new("/profile", "en")
            .with_cookies(Cookies::new().with("mywebsite", "alice"));

        assert_eq!(request.cookie("mywebsite"), Some("alice"));
        assert_eq!(request.cookie("missing"), None);
    }

    #[test]
    fn test_cookies_from_iter() {
        let cookies: Cookies = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("b"), Some("2"));
    }

    #[test]
    fn test_cookie_insert_replaces() {
        let mut cookies = Cookies::new().with("a", "1");
        cookies.insert("a", "2");
        assert_eq!(cookies.get("a"), Some("2"));
        assert_eq!(cookies.len(), 1);
    }
}
