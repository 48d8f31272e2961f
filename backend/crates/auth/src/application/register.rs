//! Register Use Case
//!
//! Creates an unverified account and dispatches the verification link.
//! No tokens are issued until the email is verified.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::notification::VerificationNotifier;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    phone::Phone,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
    verification_token::PendingVerification,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub email: Email,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    notifier: Arc<dyn VerificationNotifier>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<dyn VerificationNotifier>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = PersonName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let phone = Phone::new(&input.phone)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let ttl = AuthConfig::delta(self.config.verification_ttl);
        let verification = PendingVerification::issue(ttl);
        let link = self.config.verification_link(verification.token.as_str());

        let user = User::new(name, email, phone, password_hash, verification);

        // A concurrent registration can still win the unique index
        self.repo.create(&user).await?;

        self.notifier.send_verification(&user.email, &link);

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput {
            user_id: user.user_id,
            email: user.email,
        })
    }
}
