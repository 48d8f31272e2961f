//! Application Layer
//!
//! Use cases for carts, wishlists and orders.

pub mod cart;
pub mod order;
pub mod wishlist;

// Re-exports
pub use cart::CartUseCase;
pub use order::{OrderUseCase, PlaceOrderInput};
pub use wishlist::WishlistUseCase;
