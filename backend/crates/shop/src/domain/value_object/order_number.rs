//! Order Number
//!
//! Human-facing order reference: `ORD-<unix millis>-<9 base36 chars>`, for
//! example `ORD-1718000000000-K3ZP0Q7AB`. Uniqueness is enforced by the
//! store; the random suffix makes a collision within one millisecond
//! improbable.

use chrono::Utc;
use derive_more::Display;
use platform::crypto::random_string;
use serde::{Deserialize, Serialize};

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn generate() -> Self {
        let suffix = random_string(BASE36, SUFFIX_LEN);
        Self(format!("ORD-{}-{}", Utc::now().timestamp_millis(), suffix))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
