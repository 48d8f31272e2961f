//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    cart::Cart,
    line_item::{LineItem, WishlistItem},
    order::{Order, OrderDraft, ShippingAddress},
    wishlist::Wishlist,
};
pub use repository::{CartRepository, OrderRepository, ShopRepository, WishlistRepository};
pub use value_object::{
    order_number::OrderNumber, order_status::OrderStatus, payment_method::PaymentMethod,
    product::{ProductDetails, ProductInput},
};
