//! Bearer token extraction
//!
//! Reads the credential from an `Authorization: Bearer <token>` header.

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from request headers
///
/// Returns `None` when the header is absent, is not valid UTF-8, does not use
/// the `Bearer` scheme, or carries an empty token. Callers treat all of these
/// as "no token presented".
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extracts_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_other_scheme_is_ignored() {
        assert_eq!(extract_bearer_token(&headers_with("Basic dXNlcjpwdw==")), None);
        assert_eq!(extract_bearer_token(&headers_with("bearer lowercase")), None);
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(extract_bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer    ")), None);
    }
}
