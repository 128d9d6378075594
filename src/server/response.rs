//! Probe response bodies.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::error;

use crate::health::{CheckResults, Evaluation};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

// Pre-allocated static bytes for common responses
pub static TERSE_BODY: Bytes = Bytes::from_static(b"{}\n");
pub static METHOD_NOT_ALLOWED_BODY: Bytes = Bytes::from_static(b"method not allowed\n");
pub static NOT_FOUND_BODY: Bytes = Bytes::from_static(b"404 page not found\n");

/// Encode results as JSON with 4-space indentation and a trailing newline.
pub fn encode_full(results: &CheckResults) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::with_capacity(64 + results.len() * 32);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    results.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Build the probe response for an evaluation.
///
/// Orchestrators only look at the status code, so the body stays `{}`
/// unless `full` is set.
pub fn probe_response(evaluation: &Evaluation, full: bool) -> Response<Full<Bytes>> {
    let body = if full {
        match encode_full(&evaluation.results) {
            Ok(encoded) => Bytes::from(encoded),
            Err(e) => {
                error!("Failed to encode probe results: {}", e);
                TERSE_BODY.clone()
            }
        }
    } else {
        TERSE_BODY.clone()
    };

    let mut response = Response::new(Full::new(body));
    *response.status_mut() = evaluation.status.status_code();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}

/// Plain-text error response (405, 404).
pub fn text_response(status: StatusCode, body: &Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.clone()));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_CONTENT_TYPE));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}

#[inline]
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    text_response(StatusCode::METHOD_NOT_ALLOWED, &METHOD_NOT_ALLOWED_BODY)
}

#[inline]
pub fn not_found() -> Response<Full<Bytes>> {
    text_response(StatusCode::NOT_FOUND, &NOT_FOUND_BODY)
}
