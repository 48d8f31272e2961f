//! Person Name Value Object
//!
//! Free-form display name captured at registration.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Trimmed, non-empty, at most 100 characters
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Name is required").with_field("name"));
        }
        if name.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                PERSON_NAME_MAX_LENGTH
            ))
            .with_field("name"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
