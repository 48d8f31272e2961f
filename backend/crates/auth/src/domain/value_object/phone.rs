//! Phone Value Object
//!
//! Loosely formatted phone number: digits, spaces, `-`, `+`, `(` and `)`.
//! No attempt is made to normalize to E.164.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const PHONE_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl AsRef<str>) -> AppResult<Self> {
        let phone = phone.as_ref().trim();

        if phone.is_empty() {
            return Err(AppError::bad_request("Phone is required").with_field("phone"));
        }

        let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')');
        if phone.len() > PHONE_MAX_LENGTH || !phone.chars().all(allowed) {
            return Err(AppError::bad_request("Valid phone format is required").with_field("phone"));
        }

        Ok(Self(phone.to_string()))
    }

    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
