//! Request Extractors

use axum::extract::FromRequest;

use crate::error::AuthError;

/// `axum::Json` rejecting with [`AuthError`], so a malformed body or a
/// missing `Content-Type` answers 400 with the JSON error body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct JsonBody<T>(pub T);
