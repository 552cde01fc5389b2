//! HTTP Credential Extraction
//!
//! Common helpers for pulling the bearer credential out of request headers.
//! The API carries its access token exclusively in the `Authorization`
//! header; there is no cookie fallback.

use axum::http::{HeaderMap, header};

/// Extract a bearer token from the `Authorization` header
///
/// Returns `None` when the header is missing, is not valid UTF-8, or does
/// not use the `Bearer` scheme. The scheme comparison is case-insensitive
/// per RFC 7235.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
