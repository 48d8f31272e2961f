//! Auth Middleware
//!
//! Bearer-token gate for protected routes. On success the resolved
//! [`CurrentUser`] is inserted into request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::{AuthenticateUseCase, CurrentUser, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
pub struct AuthGateway<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthGateway<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Resolve an `Authorization` header to the caller
    pub async fn authenticate(&self, token: Option<&str>) -> Result<CurrentUser, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        AuthenticateUseCase::new(self.repo.clone(), self.tokens.clone())
            .execute(token)
            .await
    }
}

impl<R> Clone for AuthGateway<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Middleware that requires a valid access token
pub async fn require_auth<R>(
    State(gateway): State<AuthGateway<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers()).map(str::to_owned);
    let current = gateway.authenticate(token.as_deref()).await?;

    tracing::debug!(user_id = %current.user_id, "Request authenticated");

    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}
