//! User Password Value Object
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: clear text from a request, zeroized on drop
//! - [`UserPassword`]: Argon2id PHC string, safe to persist

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

/// Shown for every complexity violation so the client gets one rule to follow
pub const PASSWORD_POLICY_MESSAGE: &str =
    "Password must be at least 8 characters and include uppercase, lowercase, number, and symbol";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password for a new account; enforces the complexity policy
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw)
            .map_err(|_| AppError::bad_request(PASSWORD_POLICY_MESSAGE).with_field("password"))?;
        Ok(Self(clear_text))
    }

    /// Password presented at login; only emptiness is rejected
    pub fn for_login(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::for_verification(raw)
            .map_err(|_| AppError::bad_request("Password is required").with_field("password"))?;
        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password in Argon2id PHC format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password; `pepper` is the application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;
        Ok(Self(hashed))
    }

    /// Rehydrate from the stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))?;
        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `pepper` must match the one used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_policy() {
        assert!(RawPassword::new("Abcdef1!".to_string()).is_ok());

        for weak in ["Ab1!", "abcdef1!", "ABCDEF1!", "Abcdefg!", "Abcdefg1", ""] {
            let err = RawPassword::new(weak.to_string()).unwrap_err();
            assert_eq!(err.message(), PASSWORD_POLICY_MESSAGE);
            assert_eq!(err.field(), Some("password"));
        }
    }

    #[test]
    fn test_login_password_skips_policy() {
        assert!(RawPassword::for_login("weak".to_string()).is_ok());
        assert!(RawPassword::for_login(String::new()).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Abcdef1!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::for_login("Abcdef1?".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("Abcdef1!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(UserPassword::from_phc_string("garbage").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Secret#123x".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{:?}", hashed).contains("[HASH]"));
    }
}
