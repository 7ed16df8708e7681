//! HTTP routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::CookieJar;
use http::{header, HeaderMap, Uri};
use ssr_core::{Cookies, RenderRequest, RequestId};
use ssr_locale::{negotiate, LocaleHints};
use ssr_store::Location;

use crate::{Emitted, Orchestrator};

/// Cookie holding an explicit locale choice.
pub const LOCALE_COOKIE: &str = "locale";
/// Query parameter holding an explicit locale choice.
pub const LOCALE_QUERY: &str = "lang";
/// Header carrying an upstream request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    orchestrator: Arc<Orchestrator>,
    supported_locales: Arc<Vec<String>>,
}

impl ServerState {
    /// Wrap an orchestrator for the router.
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        let supported_locales = Arc::new(orchestrator.supported_locales());
        Self {
            orchestrator,
            supported_locales,
        }
    }
}

/// Build the router. Every `GET` path is server-rendered.
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/", get(render))
        .route("/{*path}", get(render))
        .with_state(ServerState::new(orchestrator))
}

async fn render(
    State(state): State<ServerState>,
    uri: Uri,
    headers: HeaderMap,
    jar: CookieJar,
) -> Emitted {
    let url = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let cookies: Cookies = jar
        .iter()
        .map(|cookie| (cookie.name(), cookie.value()))
        .collect();

    let location = Location::parse(&url);
    let hints = LocaleHints {
        query: location.query(LOCALE_QUERY),
        cookie: cookies.get(LOCALE_COOKIE),
        accept_language: headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    };
    let locale_key = negotiate(
        &hints,
        state.supported_locales.as_slice(),
        &state.orchestrator.config().default_locale,
    )
    .to_string();

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(RequestId::from_string)
        .unwrap_or_else(RequestId::generate);

    let request = RenderRequest::new(url, locale_key)
        .with_cookies(cookies)
        .with_request_id(request_id);

    Emitted(state.orchestrator.handle(&request).await)
}
