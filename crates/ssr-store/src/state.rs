//! State shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Full application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// In-memory navigation state.
    pub router: RouterState,
    /// Authentication state.
    pub auth: AuthState,
    /// Data fetched by preloads, keyed by preload key.
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
}

impl AppState {
    /// Initial state for a URL.
    pub fn new(url: &str) -> Self {
        Self {
            router: RouterState::new(url),
            auth: AuthState::default(),
            data: BTreeMap::new(),
        }
    }
}

/// Authentication slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthState {
    /// Initial value before request cookies are applied.
    #[default]
    Unresolved,
    /// Authenticated as the given identity.
    Authenticated {
        /// Identity token taken from the auth cookie.
        user: String,
    },
    /// Explicitly logged out.
    LoggedOut,
}

impl AuthState {
    /// Authenticated identity, if any.
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    /// Whether the user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// How the current location was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    /// Initial entry.
    #[default]
    Pop,
    /// Pushed a new entry.
    Push,
    /// Replaced the current entry.
    Replace,
}

/// A parsed location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path component, always starting with `/`.
    pub pathname: String,
    /// Query string including `?`, or empty.
    pub search: String,
    /// Fragment including `#`, or empty.
    pub hash: String,
}

impl Location {
    /// Parse a request URL (`/path?query#hash`).
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.find('#') {
            Some(i) => (&url[..i], &url[i..]),
            None => (url, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        let pathname = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            pathname,
            search: if search == "?" { String::new() } else { search.to_string() },
            hash: if hash == "#" { String::new() } else { hash.to_string() },
        }
    }

    /// Reassemble the URL.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    /// Value of a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }
}

/// Memory-history router slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterState {
    /// Current location.
    pub location: Location,
    /// How it was reached.
    pub action: HistoryAction,
}

impl RouterState {
    /// Router state positioned at `url`.
    pub fn new(url: &str) -> Self {
        Self {
            location: Location::parse(url),
            action: HistoryAction::Pop,
        }
    }
}
