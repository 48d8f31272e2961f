//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod notification;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::{StoredRefreshToken, User};
pub use notification::VerificationNotifier;
pub use repository::UserRepository;
