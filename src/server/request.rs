//! Request parsing utilities.

use std::borrow::Cow;

/// Percent-decode a query component, treating `+` as a space.
#[inline]
fn decode_component(s: &str) -> Cow<'_, str> {
    if !s.contains(['%', '+']) {
        return Cow::Borrowed(s);
    }
    let spaced = s.replace('+', " ");
    Cow::Owned(
        percent_encoding::percent_decode_str(&spaced)
            .decode_utf8_lossy()
            .into_owned(),
    )
}

/// First value of `key` in a query string, decoded.
///
/// A key without `=` yields an empty value.
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<Cow<'a, str>> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k) == key).then(|| decode_component(v))
        })
}

/// True when the request asks for the per-check body (`?full=1`).
pub fn wants_full_body(query: Option<&str>) -> bool {
    query
        .and_then(|q| query_param(q, "full"))
        .is_some_and(|v| v == "1")
}
