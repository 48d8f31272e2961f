//! HTTP Handlers

use axum::body::Bytes;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::{
    AuthConfig, CurrentUser, CurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase,
    RefreshTokenUseCase, RegisterInput, RegisterUseCase, TokenService, VerifyEmailUseCase,
};
use crate::domain::notification::VerificationNotifier;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, RefreshTokenRequest,
    RefreshTokenResponse, RegisterRequest, UserProfile, UserSummary, VerifyRequest,
};
use crate::presentation::extract::JsonBody;
use crate::presentation::middleware::AuthGateway;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
    pub notifier: Arc<dyn VerificationNotifier>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig, notifier: Arc<dyn VerificationNotifier>) -> Self {
        Self {
            repo: Arc::new(repo),
            tokens: Arc::new(TokenService::new(&config)),
            config: Arc::new(config),
            notifier,
        }
    }

    /// Bearer-token gate over the same store and keys
    pub fn gateway(&self) -> AuthGateway<R> {
        AuthGateway::new(self.repo.clone(), self.tokens.clone())
    }
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<MessageResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            phone: req.phone,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Registration successful. Verify your email to continue.",
        )),
    ))
}

// ============================================================================
// Verify
// ============================================================================

/// POST /api/auth/verify
///
/// Token from `?token=` or from a `{"token": ...}` body; the query wins.
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<VerifyRequest>,
    body: Bytes,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let body_token = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<VerifyRequest>(&body)
            .map_err(AppError::from)?
            .token
    };
    let token = query.token.or(body_token);

    VerifyEmailUseCase::new(state.repo.clone())
        .execute(token.as_deref())
        .await?;

    Ok(Json(MessageResponse::new("Email verified successfully")))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.tokens.access_token.clone(),
        access_token: output.tokens.access_token,
        refresh_token: output.tokens.refresh_token,
        user: UserSummary::from(&output.user),
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh-token
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> AuthResult<Json<RefreshTokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let pair = RefreshTokenUseCase::new(state.repo.clone(), state.tokens.clone())
        .execute(&req.refresh_token)
        .await?;

    Ok(Json(RefreshTokenResponse {
        token: pair.access_token.clone(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

// ============================================================================
// Authenticated
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<MeResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&current.user_id)
        .await?;

    Ok(Json(MeResponse {
        user: UserProfile::from(&user),
    }))
}

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    LogoutUseCase::new(state.repo.clone())
        .execute(&current.user_id)
        .await?;

    Ok(Json(MessageResponse::new("Logged out")))
}
