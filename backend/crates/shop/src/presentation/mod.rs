//! Presentation Layer
//!
//! HTTP handlers, DTOs and router. Authentication comes from the auth
//! crate's gateway middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::ShopAppState;
pub use router::shop_router;
