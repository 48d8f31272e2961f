//! Shop Backend Module
//!
//! Per-user cart, wishlist and order management behind the auth crate's
//! bearer-token gateway.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Cart, wishlist and order use cases
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - One cart and one wishlist per user, created on first access
//! - Adding the same product, size and color to a cart raises its quantity;
//!   the same to a wishlist is rejected
//! - Cart totals are always derived from the items
//! - Orders freeze items and totals at creation; only the status changes,
//!   and cancellation is refused once shipped or delivered

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::ShopRepository;
pub use error::{ShopError, ShopResult};
pub use infra::{MemoryShopRepository, PgShopRepository};
pub use presentation::{ShopAppState, shop_router};
