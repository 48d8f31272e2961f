//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer (PostgreSQL and in-memory).

use chrono::{DateTime, Utc};

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, token_salt::TokenSalt, user_id::UserId};
use crate::error::AuthResult;

/// Credential store
///
/// Every mutation is a single-row update so paired fields (verification
/// token and flag, refresh hash and expiry) change together.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; `AuthError::EmailTaken` on a duplicate email
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Case-insensitive through `Email` normalization
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Match only while `now` is strictly before the stored expiry
    async fn find_by_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<User>>;

    /// Set the verified flag and clear the verification token and expiry,
    /// but only while `token` is still the user's live token. Returns
    /// whether this call consumed it.
    async fn mark_verified(
        &self,
        user_id: &UserId,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<bool>;

    /// Replace the token salt, revoking every outstanding token
    async fn update_token_salt(&self, user_id: &UserId, salt: &TokenSalt) -> AuthResult<()>;

    async fn set_refresh_token_data(
        &self,
        user_id: &UserId,
        hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    async fn clear_refresh_token_data(&self, user_id: &UserId) -> AuthResult<()>;
}
