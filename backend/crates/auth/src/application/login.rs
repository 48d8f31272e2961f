//! Login Use Case
//!
//! Checks the password, then the verification flag, then issues a token
//! pair. The verification check comes after the password check, so an
//! unverified account only learns it is unverified with the right password.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, token_salt::TokenSalt, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub tokens: TokenPair,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::for_login(input.password)?;

        let mut user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_verified {
            return Err(AuthError::EmailNotVerified);
        }

        // Rows that predate token salts get one on first login
        let salt = match user.token_salt.clone() {
            Some(salt) => salt,
            None => {
                let salt = TokenSalt::generate();
                self.repo.update_token_salt(&user.user_id, &salt).await?;
                user.set_token_salt(salt.clone());
                salt
            }
        };

        let tokens = self.tokens.issue_pair(self.repo.as_ref(), &user, &salt).await?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { tokens, user })
    }
}
