//! Refresh Token Use Case
//!
//! Trades a refresh token for a new pair. Every check below must pass and
//! every failure yields the same [`AuthError::InvalidRefreshToken`]:
//!
//! 1. signature and expiry
//! 2. `kind` is refresh
//! 3. the user exists
//! 4. a refresh hash and expiry are stored
//! 5. the stored expiry has not passed
//! 6. the embedded salt is the current salt
//! 7. the token hashes to the stored hash
//!
//! The new refresh hash overwrites the old one, so the presented token stops
//! working as soon as this returns.

use std::sync::Arc;

use chrono::Utc;

use crate::application::token_service::{TokenPair, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::validation("Refresh token is required"));
        }

        let claims = self.tokens.decode_refresh(refresh_token)?;

        let user = self
            .repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let stored = user
            .refresh_token
            .as_ref()
            .ok_or(AuthError::InvalidRefreshToken)?;

        if stored.is_expired_at(Utc::now()) {
            return Err(AuthError::InvalidRefreshToken);
        }

        if !user.salt_matches(&claims.salt) {
            return Err(AuthError::InvalidRefreshToken);
        }

        let presented_hash = TokenService::hash_refresh_token(refresh_token);
        if !platform::crypto::constant_time_eq(presented_hash.as_bytes(), stored.hash.as_bytes()) {
            tracing::warn!(user_id = %user.user_id, "Superseded refresh token presented");
            return Err(AuthError::InvalidRefreshToken);
        }

        let salt = user
            .token_salt
            .clone()
            .ok_or(AuthError::InvalidRefreshToken)?;

        let pair = self.tokens.issue_pair(self.repo.as_ref(), &user, &salt).await?;

        tracing::debug!(user_id = %user.user_id, "Refresh token rotated");

        Ok(pair)
    }
}
