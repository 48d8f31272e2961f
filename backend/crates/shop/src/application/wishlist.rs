//! Wishlist Use Cases

use std::sync::Arc;

use kernel::id::{LineItemId, UserId};

use crate::domain::entity::wishlist::Wishlist;
use crate::domain::repository::WishlistRepository;
use crate::domain::value_object::product::{ProductDetails, ProductInput};
use crate::error::{ShopError, ShopResult};

pub struct WishlistUseCase<R>
where
    R: WishlistRepository,
{
    repo: Arc<R>,
}

impl<R> WishlistUseCase<R>
where
    R: WishlistRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The user's wishlist, created empty when absent
    pub async fn get(&self, user_id: &UserId) -> ShopResult<Wishlist> {
        if let Some(wishlist) = self.repo.find_wishlist(user_id).await? {
            return Ok(wishlist);
        }

        let wishlist = Wishlist::new(*user_id);
        self.repo.save_wishlist(&wishlist).await?;
        Ok(wishlist)
    }

    /// `AlreadyInWishlist` when the same product, size and color is saved
    pub async fn add(&self, user_id: &UserId, product: ProductInput) -> ShopResult<Wishlist> {
        let details = ProductDetails::new(product)?;

        let mut wishlist = self
            .repo
            .find_wishlist(user_id)
            .await?
            .unwrap_or_else(|| Wishlist::new(*user_id));
        let item_id = wishlist.add(details)?.item_id;
        self.repo.save_wishlist(&wishlist).await?;

        tracing::debug!(user_id = %user_id, item_id = %item_id, "Wishlist item added");
        Ok(wishlist)
    }

    pub async fn remove_item(&self, user_id: &UserId, item_id: &str) -> ShopResult<Wishlist> {
        let mut wishlist = self.existing(user_id).await?;

        if let Ok(item_id) = LineItemId::parse_str(item_id) {
            wishlist.remove(&item_id);
        }
        self.repo.save_wishlist(&wishlist).await?;

        Ok(wishlist)
    }

    pub async fn clear(&self, user_id: &UserId) -> ShopResult<Wishlist> {
        let mut wishlist = self.existing(user_id).await?;
        wishlist.clear();
        self.repo.save_wishlist(&wishlist).await?;

        Ok(wishlist)
    }

    async fn existing(&self, user_id: &UserId) -> ShopResult<Wishlist> {
        self.repo
            .find_wishlist(user_id)
            .await?
            .ok_or(ShopError::WishlistNotFound)
    }
}
