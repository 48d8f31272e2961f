//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer (PostgreSQL and in-memory).

use kernel::id::{OrderId, UserId};

use crate::domain::entity::{cart::Cart, order::Order, wishlist::Wishlist};
use crate::error::ShopResult;

/// One cart per user
#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    async fn find_cart(&self, user_id: &UserId) -> ShopResult<Option<Cart>>;

    /// Insert or replace the user's cart, totals included
    async fn save_cart(&self, cart: &Cart) -> ShopResult<()>;
}

/// One wishlist per user
#[trait_variant::make(WishlistRepository: Send)]
pub trait LocalWishlistRepository {
    async fn find_wishlist(&self, user_id: &UserId) -> ShopResult<Option<Wishlist>>;

    async fn save_wishlist(&self, wishlist: &Wishlist) -> ShopResult<()>;
}

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Newest first
    async fn list_orders(&self, user_id: &UserId) -> ShopResult<Vec<Order>>;

    /// `None` when the order does not exist or belongs to someone else
    async fn find_order(&self, order_id: &OrderId, user_id: &UserId) -> ShopResult<Option<Order>>;

    async fn create_order(&self, order: &Order) -> ShopResult<()>;

    /// Persist a status change
    async fn update_order_status(&self, order: &Order) -> ShopResult<()>;
}

/// Everything the shop handlers need from a store
pub trait ShopRepository:
    CartRepository + WishlistRepository + OrderRepository + Send + Sync + 'static
{
}

impl<T> ShopRepository for T where
    T: CartRepository + WishlistRepository + OrderRepository + Send + Sync + 'static
{
}
