//! Authenticate Use Case
//!
//! Resolves a bearer access token to the caller's identity. Bad signature,
//! expiry, wrong kind, unknown user and stale salt all surface as the same
//! [`AuthError::InvalidToken`].

use std::sync::Arc;

use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Identity attached to an authenticated request
///
/// Downstream handlers read identity from here, never from the raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: Email,
}

pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, access_token: &str) -> AuthResult<CurrentUser> {
        let claims = self.tokens.decode_access(access_token)?;

        let user = self
            .repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !user.salt_matches(&claims.salt) {
            return Err(AuthError::InvalidToken);
        }

        Ok(CurrentUser {
            user_id: user.user_id,
            email: user.email,
        })
    }
}
