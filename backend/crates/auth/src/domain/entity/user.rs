//! User Entity
//!
//! The credential record: identity, password hash, verification state,
//! token salt and the hash of the single live refresh token.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, person_name::PersonName, phone::Phone, token_salt::TokenSalt, user_id::UserId,
    user_password::UserPassword, verification_token::PendingVerification,
};

/// Hash and expiry of the most recently issued refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRefreshToken {
    /// SHA-256 of the token, lowercase hex
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredRefreshToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: PersonName,
    /// Unique, lowercased
    pub email: Email,
    pub phone: Phone,
    pub password_hash: UserPassword,
    /// `None` only for rows created before salts existed; filled at login
    pub token_salt: Option<TokenSalt>,
    pub is_verified: bool,
    /// Present only while verification is pending
    pub verification: Option<PendingVerification>,
    /// Present between login/refresh and logout
    pub refresh_token: Option<StoredRefreshToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New unverified user with a fresh token salt
    pub fn new(
        name: PersonName,
        email: Email,
        phone: Phone,
        password_hash: UserPassword,
        verification: PendingVerification,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            phone,
            password_hash,
            token_salt: Some(TokenSalt::generate()),
            is_verified: false,
            verification: Some(verification),
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Does `token` match the pending verification, and is it still live?
    pub fn accepts_verification_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verification
            .as_ref()
            .is_some_and(|v| v.token.as_str() == token && v.is_valid_at(now))
    }

    /// Transition to verified; the pending token is consumed
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification = None;
        self.updated_at = Utc::now();
    }

    /// Does the salt embedded in a token equal the current one?
    pub fn salt_matches(&self, presented: &str) -> bool {
        self.token_salt
            .as_ref()
            .is_some_and(|salt| salt.matches(presented))
    }

    pub fn set_token_salt(&mut self, salt: TokenSalt) {
        self.token_salt = Some(salt);
        self.updated_at = Utc::now();
    }

    pub fn set_refresh_token(&mut self, stored: StoredRefreshToken) {
        self.refresh_token = Some(stored);
        self.updated_at = Utc::now();
    }

    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use chrono::Duration;

    fn sample_user() -> User {
        let raw = RawPassword::new("Abcdef1!".to_string()).unwrap();
        User::new(
            PersonName::new("A").unwrap(),
            Email::new("a@x.com").unwrap(),
            Phone::new("+1 555").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            PendingVerification::issue(Duration::hours(24)),
        )
    }

    #[test]
    fn test_new_user_is_unverified_with_salt() {
        let user = sample_user();
        assert!(!user.is_verified);
        assert!(user.token_salt.is_some());
        assert!(user.verification.is_some());
        assert!(user.refresh_token.is_none());
    }

    #[test]
    fn test_verification_consumes_token() {
        let mut user = sample_user();
        let token = user.verification.as_ref().unwrap().token.as_str().to_string();

        assert!(user.accepts_verification_token(&token, Utc::now()));
        assert!(!user.accepts_verification_token("other", Utc::now()));

        user.mark_verified();
        assert!(user.is_verified);
        assert!(!user.accepts_verification_token(&token, Utc::now()));
    }

    #[test]
    fn test_expired_verification_token_rejected() {
        let user = sample_user();
        let pending = user.verification.clone().unwrap();
        assert!(!user.accepts_verification_token(pending.token.as_str(), pending.expires_at));
    }

    #[test]
    fn test_salt_matches_current_only() {
        let mut user = sample_user();
        let old = user.token_salt.clone().unwrap();
        assert!(user.salt_matches(old.as_str()));

        user.set_token_salt(TokenSalt::generate());
        assert!(!user.salt_matches(old.as_str()));

        user.token_salt = None;
        assert!(!user.salt_matches(""));
    }

    #[test]
    fn test_refresh_token_expiry_is_inclusive() {
        let now = Utc::now();
        let stored = StoredRefreshToken {
            hash: "h".into(),
            expires_at: now,
        };
        assert!(stored.is_expired_at(now));
        assert!(!stored.is_expired_at(now - Duration::seconds(1)));
    }
}
