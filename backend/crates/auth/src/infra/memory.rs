//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL store, held in a `HashMap` behind an
//! async `RwLock`. Each method takes the lock once, so paired field updates
//! are atomic just like the single-row SQL updates. Used by the test suites
//! and for running the API without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::user::{StoredRefreshToken, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, token_salt::TokenSalt, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Apply `f` to a stored user; unknown ids are a no-op like an UPDATE
    /// matching zero rows
    async fn update_with(&self, user_id: &UserId, f: impl FnOnce(&mut User)) {
        if let Some(user) = self.users.write().await.get_mut(user_id) {
            f(user);
        }
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        if users.contains_key(&user.user_id) {
            return Err(AuthError::Internal("Duplicate user id".to_string()));
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.accepts_verification_token(token, now))
            .cloned())
    }

    async fn mark_verified(
        &self,
        user_id: &UserId,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(user_id) {
            Some(user) if user.accepts_verification_token(token, now) => {
                user.mark_verified();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_token_salt(&self, user_id: &UserId, salt: &TokenSalt) -> AuthResult<()> {
        let salt = salt.clone();
        self.update_with(user_id, move |u| u.set_token_salt(salt)).await;
        Ok(())
    }

    async fn set_refresh_token_data(
        &self,
        user_id: &UserId,
        hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let stored = StoredRefreshToken {
            hash: hash.to_string(),
            expires_at,
        };
        self.update_with(user_id, move |u| u.set_refresh_token(stored))
            .await;
        Ok(())
    }

    async fn clear_refresh_token_data(&self, user_id: &UserId) -> AuthResult<()> {
        self.update_with(user_id, User::clear_refresh_token).await;
        Ok(())
    }
}
