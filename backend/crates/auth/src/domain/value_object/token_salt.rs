//! Token Salt Value Object
//!
//! Per-user random value embedded in every issued token. Replacing it
//! revokes every outstanding access and refresh token at once.

use platform::crypto::{constant_time_eq, random_hex_token};
use std::fmt;

/// Random bytes per salt (hex encoded to twice the length)
const TOKEN_SALT_BYTES: usize = 16;

#[derive(Clone, PartialEq, Eq)]
pub struct TokenSalt(String);

impl TokenSalt {
    /// Fresh random salt
    pub fn generate() -> Self {
        Self(random_hex_token(TOKEN_SALT_BYTES))
    }

    pub fn from_db(salt: impl Into<String>) -> Self {
        Self(salt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against the salt carried by a token
    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), presented.as_bytes())
    }
}

impl fmt::Debug for TokenSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSalt").field(&"[REDACTED]").finish()
    }
}
