//! Pure per-slice reducers.

use std::collections::BTreeMap;

use crate::{Action, AppState, AuthState, HistoryAction, Location, RouterState};

/// Apply an action to the whole state.
pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        router: reduce_router(state.router, action),
        auth: reduce_auth(state.auth, action),
        data: reduce_data(state.data, action),
    }
}

/// Auth slice reducer.
pub fn reduce_auth(state: AuthState, action: &Action) -> AuthState {
    match action {
        Action::SetCurrentUser(user) => AuthState::Authenticated { user: user.clone() },
        Action::Logout => AuthState::LoggedOut,
        _ => state,
    }
}

/// Router slice reducer.
pub fn reduce_router(state: RouterState, action: &Action) -> RouterState {
    match action {
        Action::Navigate(url) => RouterState {
            location: Location::parse(url),
            action: HistoryAction::Push,
        },
        Action::Replace(url) => RouterState {
            location: Location::parse(url),
            action: HistoryAction::Replace,
        },
        _ => state,
    }
}

/// Preloaded data reducer.
pub fn reduce_data(
    mut state: BTreeMap<String, serde_json::Value>,
    action: &Action,
) -> BTreeMap<String, serde_json::Value> {
    if let Action::DataLoaded { key, value } = action {
        state.insert(key.clone(), value.clone());
    }
    state
}
