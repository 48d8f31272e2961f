//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations, mail sink
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with email verification
//! - Email + password login returning an access/refresh JWT pair
//! - Refresh-token rotation (only the latest refresh token is accepted)
//! - Logout revokes every outstanding token by rotating the user's token salt
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Refresh tokens stored as SHA-256 hashes only
//! - Every token embeds the user's token salt; a salt mismatch rejects it
//! - Token failures are reported with one generic message per token kind

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::{AuthConfig, CurrentUser, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{ChannelMailer, MemoryUserRepository, PgUserRepository};
pub use presentation::{AuthAppState, AuthGateway, auth_router, require_auth};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
