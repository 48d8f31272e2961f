//! Token Service
//!
//! Issues and decodes the two JWT kinds (HS256):
//! - access: `{sub, email, salt, kind: "access"}`, stateless check
//! - refresh: `{sub, salt, kind: "refresh"}`, also matched against the
//!   stored hash by the refresh use case
//!
//! Each kind has its own signing secret. Every issuance also draws a random
//! `jti`, so two tokens minted in the same second still differ.

use chrono::{TimeDelta, Utc};
use derive_more::Display;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{StoredRefreshToken, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, token_salt::TokenSalt, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Token kind claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[display("access")]
    Access,
    #[display("refresh")]
    Refresh,
}

/// JWT claims shared by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// User's token salt at issuance
    pub salt: String,
    pub kind: TokenKind,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

/// Freshly minted access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access_encoding: EncodingKey::from_secret(&config.access_token_secret),
            access_decoding: DecodingKey::from_secret(&config.access_token_secret),
            refresh_encoding: EncodingKey::from_secret(&config.refresh_token_secret),
            refresh_decoding: DecodingKey::from_secret(&config.refresh_token_secret),
            access_ttl: AuthConfig::delta(config.access_token_ttl),
            refresh_ttl: AuthConfig::delta(config.refresh_token_ttl),
            validation,
        }
    }

    fn claims(
        user_id: &UserId,
        email: Option<&Email>,
        salt: &TokenSalt,
        kind: TokenKind,
        ttl: TimeDelta,
    ) -> Claims {
        let iat = Utc::now().timestamp();
        Claims {
            sub: *user_id.as_uuid(),
            email: email.map(|e| e.as_str().to_string()),
            salt: salt.as_str().to_string(),
            kind,
            jti: Uuid::new_v4(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    pub fn issue_access(
        &self,
        user_id: &UserId,
        email: &Email,
        salt: &TokenSalt,
    ) -> AuthResult<String> {
        let claims = Self::claims(user_id, Some(email), salt, TokenKind::Access, self.access_ttl);
        Ok(jsonwebtoken::encode(&Header::default(), &claims, &self.access_encoding)?)
    }

    /// Returns the token together with the hash/expiry to persist
    pub fn issue_refresh(
        &self,
        user_id: &UserId,
        salt: &TokenSalt,
    ) -> AuthResult<(String, StoredRefreshToken)> {
        let claims = Self::claims(user_id, None, salt, TokenKind::Refresh, self.refresh_ttl);
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.refresh_encoding)?;

        let stored = StoredRefreshToken {
            hash: Self::hash_refresh_token(&token),
            expires_at: Utc::now() + self.refresh_ttl,
        };
        Ok((token, stored))
    }

    /// Signature, expiry and kind of an access token
    pub fn decode_access(&self, token: &str) -> AuthResult<Claims> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.access_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)?;

        if claims.kind != TokenKind::Access {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Signature, expiry and kind of a refresh token
    pub fn decode_refresh(&self, token: &str) -> AuthResult<Claims> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.refresh_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::InvalidRefreshToken);
        }
        Ok(claims)
    }

    /// Refresh tokens are stored as SHA-256 hex, never in clear
    pub fn hash_refresh_token(token: &str) -> String {
        platform::crypto::sha256_hex(token.as_bytes())
    }

    /// Mint a pair for `user` under `salt` and overwrite the stored refresh
    /// hash, which invalidates the previous refresh token
    pub async fn issue_pair<R>(&self, repo: &R, user: &User, salt: &TokenSalt) -> AuthResult<TokenPair>
    where
        R: UserRepository,
    {
        let access_token = self.issue_access(&user.user_id, &user.email, salt)?;
        let (refresh_token, stored) = self.issue_refresh(&user.user_id, salt)?;

        repo.set_refresh_token_data(&user.user_id, &stored.hash, stored.expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
