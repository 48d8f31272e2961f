//! Infrastructure Layer
//!
//! Store implementations for the shop repository traits.

pub mod memory;
pub mod postgres;

pub use memory::MemoryShopRepository;
pub use postgres::PgShopRepository;
