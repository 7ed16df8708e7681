//! Response emission.

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::{header, HeaderValue, StatusCode};
use ssr_core::ResponseOutcome;
use tracing::warn;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Write a `ResponseOutcome` as an HTTP response.
///
/// Failures are a bare 404 with no body. A redirect is a 302 with only a
/// `Location` header.
pub fn emit(outcome: ResponseOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status()).unwrap_or(StatusCode::NOT_FOUND);

    match outcome {
        ResponseOutcome::TemplateMissing | ResponseOutcome::RenderFailed => not_found(),
        ResponseOutcome::Redirect(location) => match HeaderValue::from_str(&location) {
            Ok(value) => Response::builder()
                .status(status)
                .header(header::LOCATION, value)
                .body(Body::empty())
                .unwrap_or_else(|_| not_found()),
            Err(err) => {
                warn!(%location, error = %err, "redirect target is not a valid header value");
                not_found()
            }
        },
        ResponseOutcome::Success(html) => Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, HTML_CONTENT_TYPE)
            .body(Body::from(html))
            .unwrap_or_else(|_| not_found()),
    }
}

fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Handler return type wrapping a `ResponseOutcome`.
#[derive(Debug)]
pub struct Emitted(pub ResponseOutcome);

impl IntoResponse for Emitted {
    fn into_response(self) -> Response {
        emit(self.0)
    }
}
