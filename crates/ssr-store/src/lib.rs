//! Request-scoped application state.
//!
//! A `Store` is created fresh for every request and never shared between
//! requests. Its snapshot is what the client hydrates from.
//!
//! - `Store` - Owner of the state, applies `Action`s through pure reducers
//! - `AppState` - Router, auth and preloaded data slices
//! - `seed_auth` - Resolves the auth slice from request cookies

mod action;
mod reducer;
mod state;
mod store;

pub use action::*;
pub use reducer::*;
pub use state::*;
pub use store::*;
