//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod mailer;
pub mod memory;
pub mod postgres;

pub use mailer::{ChannelMailer, VerificationEmail};
pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
