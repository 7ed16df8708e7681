//! The request-scoped store.

use ssr_core::Cookies;

use crate::{reduce, Action, AppState};

/// Isolated, mutable state container for one request.
///
/// Not `Clone`: a store belongs to exactly one request task.
#[derive(Debug)]
pub struct Store {
    state: AppState,
    dispatched: usize,
}

impl Store {
    /// Create a store with an in-memory history positioned at `url`.
    pub fn new(url: &str) -> Self {
        Self {
            state: AppState::new(url),
            dispatched: 0,
        }
    }

    /// Create a store and resolve its auth slice from cookies.
    pub fn create_seeded(url: &str, cookies: &Cookies, auth_cookie: &str) -> Self {
        let mut store = Self::new(url);
        seed_auth(&mut store, cookies, auth_cookie);
        store
    }

    /// Apply an action.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(action = action.kind(), "dispatch");
        let state = std::mem::replace(&mut self.state, AppState::new("/"));
        self.state = reduce(state, &action);
        self.dispatched += 1;
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of actions applied so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Serialize the current state for hydration.
    pub fn snapshot(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.state)
    }

    /// Consume the store, returning its final state.
    pub fn into_state(self) -> AppState {
        self.state
    }
}

/// Resolve the auth slice from the request cookies.
///
/// A present, non-empty identity cookie adopts that identity; anything else
/// logs out, so the slice never keeps its initial value.
pub fn seed_auth(store: &mut Store, cookies: &Cookies, auth_cookie: &str) {
    match cookies.get(auth_cookie).filter(|v| !v.is_empty()) {
        Some(token) => store.dispatch(Action::SetCurrentUser(token.to_string())),
        None => store.dispatch(Action::Logout),
    }
}
