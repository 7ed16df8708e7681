//! Localization data for server rendering.
//!
//! - `LocaleBundle` - Messages and formatting locale for one locale key
//! - `LocaleRegistry` - Immutable set of bundles loaded at startup
//! - `IntlPayload` - Locale block embedded for client hydration
//! - `negotiate` - Picks a supported locale key for a request

mod bundle;
mod intl;
mod negotiate;
mod registry;

pub use bundle::*;
pub use intl::*;
pub use negotiate::*;
pub use registry::*;
