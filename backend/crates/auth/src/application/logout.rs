//! Logout Use Case
//!
//! Rotates the token salt and clears the stored refresh token. The salt goes
//! first: once it changes every outstanding token is dead, whatever happens
//! to the second write.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{token_salt::TokenSalt, user_id::UserId};
use crate::error::{AuthError, AuthResult};

pub struct LogoutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.repo
            .update_token_salt(&user.user_id, &TokenSalt::generate())
            .await?;
        self.repo.clear_refresh_token_data(&user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "User logged out");

        Ok(())
    }
}
