//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{StoredRefreshToken, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    phone::Phone,
    token_salt::TokenSalt,
    user_id::UserId,
    user_password::UserPassword,
    verification_token::{PendingVerification, VerificationToken},
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    phone,
    password_hash,
    token_salt,
    is_verified,
    verification_token,
    verification_expires,
    refresh_token_hash,
    refresh_token_expires,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_where(predicate: &str) -> String {
        format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, predicate)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (verification_token, verification_expires) = match &user.verification {
            Some(v) => (Some(v.token.as_str()), Some(v.expires_at)),
            None => (None, None),
        };
        let (refresh_token_hash, refresh_token_expires) = match &user.refresh_token {
            Some(r) => (Some(r.hash.as_str()), Some(r.expires_at)),
            None => (None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                phone,
                password_hash,
                token_salt,
                is_verified,
                verification_token,
                verification_expires,
                refresh_token_hash,
                refresh_token_expires,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.token_salt.as_ref().map(TokenSalt::as_str))
        .bind(user.is_verified)
        .bind(verification_token)
        .bind(verification_expires)
        .bind(refresh_token_hash)
        .bind(refresh_token_expires)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if kernel::error::conversions::is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&Self::select_where("user_id = $1"))
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&Self::select_where("email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<User>> {
        let sql = Self::select_where("verification_token = $1 AND verification_expires > $2");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(token)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn mark_verified(
        &self,
        user_id: &UserId,
        token: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                is_verified = TRUE,
                verification_token = NULL,
                verification_expires = NULL,
                updated_at = NOW()
            WHERE user_id = $1
              AND verification_token = $2
              AND verification_expires > $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_token_salt(&self, user_id: &UserId, salt: &TokenSalt) -> AuthResult<()> {
        sqlx::query("UPDATE users SET token_salt = $2, updated_at = NOW() WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(salt.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_refresh_token_data(
        &self,
        user_id: &UserId,
        hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                refresh_token_hash = $2,
                refresh_token_expires = $3,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_refresh_token_data(&self, user_id: &UserId) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                refresh_token_hash = NULL,
                refresh_token_expires = NULL,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    token_salt: Option<String>,
    is_verified: bool,
    verification_token: Option<String>,
    verification_expires: Option<DateTime<Utc>>,
    refresh_token_hash: Option<String>,
    refresh_token_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        // Paired columns only count when both halves are present
        let verification = match (self.verification_token, self.verification_expires) {
            (Some(token), Some(expires_at)) => Some(PendingVerification {
                token: VerificationToken::from_db(token),
                expires_at,
            }),
            _ => None,
        };
        let refresh_token = match (self.refresh_token_hash, self.refresh_token_expires) {
            (Some(hash), Some(expires_at)) => Some(StoredRefreshToken { hash, expires_at }),
            _ => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: PersonName::from_db(self.name),
            email: Email::from_db(self.email),
            phone: Phone::from_db(self.phone),
            password_hash,
            token_salt: self.token_salt.map(TokenSalt::from_db),
            is_verified: self.is_verified,
            verification,
            refresh_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
