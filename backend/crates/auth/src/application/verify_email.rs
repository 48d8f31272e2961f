//! Verify Email Use Case
//!
//! Consumes a verification token exactly once. Unknown, consumed and
//! expired tokens are reported the same way.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, token: Option<&str>) -> AuthResult<UserId> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::VerificationTokenRequired)?;

        let now = Utc::now();
        let user = self
            .repo
            .find_by_verification_token(token, now)
            .await?
            .ok_or(AuthError::InvalidVerificationToken)?;

        // A concurrent request may have consumed the token since the lookup
        if !self.repo.mark_verified(&user.user_id, token, now).await? {
            return Err(AuthError::InvalidVerificationToken);
        }

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(user.user_id)
    }
}
