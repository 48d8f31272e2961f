//! Wishlist Entity
//!
//! One wishlist per user; a product variant appears at most once.

use kernel::id::UserId;
use chrono::{DateTime, Utc};
use kernel::id::LineItemId;

use crate::domain::entity::line_item::WishlistItem;
use crate::domain::value_object::product::ProductDetails;
use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wishlist {
    pub user_id: UserId,
    pub items: Vec<WishlistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add(&mut self, details: ProductDetails) -> ShopResult<&WishlistItem> {
        if self.items.iter().any(|i| i.is_variant_of(&details)) {
            return Err(ShopError::AlreadyInWishlist);
        }
        self.items.push(WishlistItem::new(details));
        self.updated_at = Utc::now();
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removing an id that is not present is a no-op
    pub fn remove(&mut self, item_id: &LineItemId) {
        self.items.retain(|i| &i.item_id != item_id);
        self.updated_at = Utc::now();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn details(color: Option<&str>) -> ProductDetails {
        ProductDetails {
            product_id: "p-1".into(),
            product_slug: "mug".into(),
            name: "Mug".into(),
            price: Decimal::from(12),
            image: Some("/img/mug.png".into()),
            size: None,
            color: color.map(String::from),
        }
    }

    #[test]
    fn test_duplicate_variant_rejected() {
        let mut wishlist = Wishlist::new(UserId::new());
        wishlist.add(details(Some("red"))).unwrap();

        assert!(matches!(
            wishlist.add(details(Some("red"))),
            Err(ShopError::AlreadyInWishlist)
        ));
        assert!(wishlist.add(details(Some("blue"))).is_ok());
        assert_eq!(wishlist.items.len(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut wishlist = Wishlist::new(UserId::new());
        let id = wishlist.add(details(None)).unwrap().item_id;
        wishlist.add(details(Some("red"))).unwrap();

        wishlist.remove(&LineItemId::new());
        assert_eq!(wishlist.items.len(), 2);

        wishlist.remove(&id);
        assert_eq!(wishlist.items.len(), 1);

        wishlist.clear();
        assert!(wishlist.items.is_empty());
    }
}
