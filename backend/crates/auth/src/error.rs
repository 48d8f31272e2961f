//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Token failures collapse into a few variants with fixed messages so a
//! client cannot tell a bad signature from an expired token or a revoked
//! salt.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that already has an account
    #[error("Email already registered")]
    EmailTaken,

    /// Request body failed validation
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Correct password but the email was never verified
    #[error("Please verify your email before logging in")]
    EmailNotVerified,

    /// No bearer token on a protected route
    #[error("Missing auth token")]
    MissingToken,

    /// Access token rejected for any reason
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Refresh token rejected for any reason
    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Verification token required")]
    VerificationTokenRequired,

    /// Unknown, consumed or expired verification token
    #[error("Invalid or expired token")]
    InvalidVerificationToken,

    /// Authenticated user no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Validation { .. }
            | AuthError::VerificationTokenRequired
            | AuthError::InvalidVerificationToken => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::InvalidRefreshToken => ErrorKind::Unauthorized,
            AuthError::EmailNotVerified => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::Validation {
                field: Some(field), ..
            } => err.with_field(field.clone()),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Refresh token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value-object failures are client errors; anything else is ours
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation {
                message: err.message().to_string(),
                field: err.field().map(str::to_string),
            },
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::from(rejection).into()
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::Internal(format!("Token encoding failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::EmailNotVerified.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::InvalidVerificationToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_failures_share_a_message() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid or expired token");
        assert_eq!(
            AuthError::InvalidVerificationToken.to_string(),
            AuthError::InvalidToken.to_string()
        );
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err: AuthError = AppError::bad_request("Name is required").with_field("name").into();
        match &err {
            AuthError::Validation { message, field } => {
                assert_eq!(message, "Name is required");
                assert_eq!(field.as_deref(), Some("name"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.to_app_error().field(), Some("name"));

        let err: AuthError = AppError::internal("hash failed").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
