//! Server Configuration
//!
//! Read once at startup. Missing required variables abort the binary with
//! an `anyhow` error naming the variable.
//!
//! | Variable                   | Default                    |
//! |----------------------------|----------------------------|
//! | `DATABASE_URL`             | required                   |
//! | `DATABASE_MAX_CONNECTIONS` | 5                          |
//! | `JWT_SECRET`               | required                   |
//! | `JWT_REFRESH_SECRET`       | `JWT_SECRET`               |
//! | `ACCESS_TOKEN_TTL_SECS`    | 7 days                     |
//! | `REFRESH_TOKEN_TTL_SECS`   | 30 days                    |
//! | `VERIFICATION_TTL_SECS`    | 24 hours                   |
//! | `PASSWORD_PEPPER`          | none                       |
//! | `FRONTEND_URL`             | `http://localhost:3000`    |
//! | `PORT`                     | 5000                       |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use auth::AuthConfig;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| anyhow!("{} must be set", key));

        let database_url = required("DATABASE_URL")?;
        let access_secret = required("JWT_SECRET")?;

        let mut auth = AuthConfig::new(
            access_secret.into_bytes(),
            get("JWT_REFRESH_SECRET").map(String::into_bytes),
        );
        auth.access_token_ttl = parse_secs(&get, "ACCESS_TOKEN_TTL_SECS", auth.access_token_ttl)?;
        auth.refresh_token_ttl =
            parse_secs(&get, "REFRESH_TOKEN_TTL_SECS", auth.refresh_token_ttl)?;
        auth.verification_ttl = parse_secs(&get, "VERIFICATION_TTL_SECS", auth.verification_ttl)?;
        auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);
        if let Some(url) = get("FRONTEND_URL") {
            auth.frontend_url = url;
        }

        Ok(Self {
            database_url,
            max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            auth,
        })
    }

    /// Allowed CORS origin, also the base of verification links
    pub fn frontend_url(&self) -> &str {
        &self.auth.frontend_url
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid value: {}", key, raw)),
        None => Ok(default),
    }
}

fn parse_secs(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration> {
    let secs: u64 = parse_or(get, key, default.as_secs())?;
    if secs == 0 {
        return Err(anyhow!("{} must be positive", key));
    }
    let ttl = Duration::from_secs(secs);
    if ttl > AuthConfig::MAX_TTL {
        return Err(anyhow!(
            "{} must be at most {} seconds",
            key,
            AuthConfig::MAX_TTL.as_secs()
        ));
    }
    Ok(ttl)
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("port", &self.port)
            .field("auth", &self.auth)
            .finish()
    }
}
