//! Cart Use Cases
//!
//! Reading the cart creates it on first access; adding creates it if
//! needed. Every other mutation requires an existing cart.

use std::sync::Arc;

use kernel::id::{LineItemId, UserId};

use crate::domain::entity::cart::Cart;
use crate::domain::repository::CartRepository;
use crate::domain::value_object::product::{ProductDetails, ProductInput};
use crate::error::{ShopError, ShopResult};

const QUANTITY_REQUIRED: &str = "Valid quantity is required";

/// Quantities arrive signed so that negative input is rejected rather than
/// failing deserialization
pub fn parse_quantity(value: Option<i64>, default: Option<u32>) -> ShopResult<u32> {
    match value {
        None => default.ok_or_else(|| ShopError::validation(QUANTITY_REQUIRED)),
        Some(n) if n >= 1 => {
            u32::try_from(n).map_err(|_| ShopError::validation(QUANTITY_REQUIRED))
        }
        Some(_) => Err(ShopError::validation(QUANTITY_REQUIRED)),
    }
}

pub struct CartUseCase<R>
where
    R: CartRepository,
{
    repo: Arc<R>,
}

impl<R> CartUseCase<R>
where
    R: CartRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The user's cart, created empty when absent
    pub async fn get(&self, user_id: &UserId) -> ShopResult<Cart> {
        if let Some(cart) = self.repo.find_cart(user_id).await? {
            return Ok(cart);
        }

        let cart = Cart::new(*user_id);
        self.repo.save_cart(&cart).await?;
        tracing::debug!(user_id = %user_id, "Cart created");
        Ok(cart)
    }

    pub async fn add(
        &self,
        user_id: &UserId,
        product: ProductInput,
        quantity: Option<i64>,
    ) -> ShopResult<Cart> {
        let details = ProductDetails::new(product)?;
        let quantity = parse_quantity(quantity, Some(1))?;

        let mut cart = self
            .repo
            .find_cart(user_id)
            .await?
            .unwrap_or_else(|| Cart::new(*user_id));
        let item_id = cart.add(details, quantity)?.item_id;
        self.repo.save_cart(&cart).await?;

        tracing::debug!(user_id = %user_id, item_id = %item_id, quantity, "Cart item added");
        Ok(cart)
    }

    pub async fn update_item(
        &self,
        user_id: &UserId,
        item_id: &str,
        quantity: Option<i64>,
    ) -> ShopResult<Cart> {
        let quantity = parse_quantity(quantity, None)?;
        let mut cart = self.existing(user_id).await?;

        let item_id = LineItemId::parse_str(item_id).map_err(|_| ShopError::CartItemNotFound)?;
        cart.update_quantity(&item_id, quantity)?;
        self.repo.save_cart(&cart).await?;

        Ok(cart)
    }

    /// Unknown item ids leave the cart unchanged
    pub async fn remove_item(&self, user_id: &UserId, item_id: &str) -> ShopResult<Cart> {
        let mut cart = self.existing(user_id).await?;

        if let Ok(item_id) = LineItemId::parse_str(item_id) {
            cart.remove(&item_id);
        }
        self.repo.save_cart(&cart).await?;

        Ok(cart)
    }

    pub async fn clear(&self, user_id: &UserId) -> ShopResult<Cart> {
        let mut cart = self.existing(user_id).await?;
        cart.clear();
        self.repo.save_cart(&cart).await?;

        Ok(cart)
    }

    async fn existing(&self, user_id: &UserId) -> ShopResult<Cart> {
        self.repo
            .find_cart(user_id)
            .await?
            .ok_or(ShopError::CartNotFound)
    }
}
