//! Shop Error Types
//!
//! Cart, wishlist and order error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Shop-specific result type alias
pub type ShopResult<T> = Result<T, ShopError>;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Cart not found")]
    CartNotFound,

    #[error("Item not found in cart")]
    CartItemNotFound,

    #[error("Wishlist not found")]
    WishlistNotFound,

    /// Same product, size and color already saved
    #[error("Item already in wishlist")]
    AlreadyInWishlist,

    /// Unknown order, or one owned by someone else
    #[error("Order not found")]
    OrderNotFound,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Cannot cancel shipped or delivered orders")]
    OrderNotCancellable,

    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    pub fn validation(message: impl Into<String>) -> Self {
        ShopError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::CartNotFound
            | ShopError::CartItemNotFound
            | ShopError::WishlistNotFound
            | ShopError::OrderNotFound => ErrorKind::NotFound,
            ShopError::AlreadyInWishlist
            | ShopError::InvalidStatus
            | ShopError::OrderNotCancellable
            | ShopError::Validation(_) => ErrorKind::BadRequest,
            ShopError::Database(_) | ShopError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ShopError::Database(e) => {
                tracing::error!(error = %e, "Shop database error");
            }
            ShopError::Internal(msg) => {
                tracing::error!(message = %msg, "Shop internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Shop error");
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ShopError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => ShopError::Validation(err.message().to_string()),
            _ => ShopError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ShopError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::from(rejection).into()
    }
}
