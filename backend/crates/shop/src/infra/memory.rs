//! In-Memory Repository Implementation
//!
//! Carts, wishlists and orders in `HashMap`s behind async `RwLock`s. Used
//! by the test suites and for running the API without a database.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{OrderId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{cart::Cart, order::Order, wishlist::Wishlist};
use crate::domain::repository::{CartRepository, OrderRepository, WishlistRepository};
use crate::error::{ShopError, ShopResult};

#[derive(Clone, Default)]
pub struct MemoryShopRepository {
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
    wishlists: Arc<RwLock<HashMap<UserId, Wishlist>>>,
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl MemoryShopRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders across all users
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

impl CartRepository for MemoryShopRepository {
    async fn find_cart(&self, user_id: &UserId) -> ShopResult<Option<Cart>> {
        Ok(self.carts.read().await.get(user_id).cloned())
    }

    async fn save_cart(&self, cart: &Cart) -> ShopResult<()> {
        self.carts.write().await.insert(cart.user_id, cart.clone());
        Ok(())
    }
}

impl WishlistRepository for MemoryShopRepository {
    async fn find_wishlist(&self, user_id: &UserId) -> ShopResult<Option<Wishlist>> {
        Ok(self.wishlists.read().await.get(user_id).cloned())
    }

    async fn save_wishlist(&self, wishlist: &Wishlist) -> ShopResult<()> {
        self.wishlists
            .write()
            .await
            .insert(wishlist.user_id, wishlist.clone());
        Ok(())
    }
}

impl OrderRepository for MemoryShopRepository {
    async fn list_orders(&self, user_id: &UserId) -> ShopResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn find_order(&self, order_id: &OrderId, user_id: &UserId) -> ShopResult<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .get(order_id)
            .filter(|o| &o.user_id == user_id)
            .cloned())
    }

    async fn create_order(&self, order: &Order) -> ShopResult<()> {
        let mut orders = self.orders.write().await;

        if orders.values().any(|o| o.order_number == order.order_number) {
            return Err(ShopError::Internal("Duplicate order number".to_string()));
        }

        orders.insert(order.order_id, order.clone());
        Ok(())
    }

    async fn update_order_status(&self, order: &Order) -> ShopResult<()> {
        if let Some(stored) = self.orders.write().await.get_mut(&order.order_id) {
            stored.status = order.status;
            stored.updated_at = order.updated_at;
        }
        Ok(())
    }
}
