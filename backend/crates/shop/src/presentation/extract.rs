//! Request Extractors

use axum::extract::FromRequest;

use crate::error::ShopError;

/// `axum::Json` rejecting with [`ShopError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ShopError))]
pub struct JsonBody<T>(pub T);
