//! Actions accepted by the store.

/// A state transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Adopt an authenticated identity.
    SetCurrentUser(String),
    /// Explicitly log out.
    Logout,
    /// Push a new location onto the memory history.
    Navigate(String),
    /// Replace the current location.
    Replace(String),
    /// Store data fetched by a preload.
    DataLoaded {
        /// Preload key.
        key: String,
        /// Fetched value.
        value: serde_json::Value,
    },
}

impl Action {
    /// Create a `DataLoaded` action.
    pub fn data_loaded(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self::DataLoaded {
            key: key.into(),
            value,
        }
    }

    /// Action type name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetCurrentUser(_) => "auth/set_current_user",
            Self::Logout => "auth/logout",
            Self::Navigate(_) => "router/navigate",
            Self::Replace(_) => "router/replace",
            Self::DataLoaded { .. } => "data/loaded",
        }
    }
}
