//! Cart Entity
//!
//! One cart per user. Totals are derived from the items and never stored
//! independently of them.

use chrono::{DateTime, Utc};
use kernel::id::{LineItemId, UserId};
use rust_decimal::Decimal;

use crate::domain::entity::line_item::LineItem;
use crate::domain::value_object::{money, product::ProductDetails};
use crate::error::{ShopError, ShopResult};

const QUANTITY_TOO_LARGE: &str = "Quantity is too large";
const TOTAL_TOO_LARGE: &str = "Cart total is too large";

fn total_of(items: &[LineItem]) -> ShopResult<Decimal> {
    money::checked_sum(items.iter().map(LineItem::subtotal))
        .ok_or_else(|| ShopError::validation(TOTAL_TOO_LARGE))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Empty cart
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add `quantity` of a variant; an existing line for the same variant
    /// grows instead of a second line appearing. The cart is unchanged when
    /// the result would not fit the stored quantity or money range.
    pub fn add(&mut self, details: ProductDetails, quantity: u32) -> ShopResult<&LineItem> {
        let mut items = self.items.clone();
        let index = match items.iter().position(|i| i.is_variant_of(&details)) {
            Some(index) => {
                let item = &mut items[index];
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| ShopError::validation(QUANTITY_TOO_LARGE))?;
                index
            }
            None => {
                items.push(LineItem::new(details, quantity));
                items.len() - 1
            }
        };
        total_of(&items)?;

        self.items = items;
        self.touch();
        Ok(&self.items[index])
    }

    pub fn update_quantity(&mut self, item_id: &LineItemId, quantity: u32) -> ShopResult<()> {
        let mut items = self.items.clone();
        let item = items
            .iter_mut()
            .find(|i| &i.item_id == item_id)
            .ok_or(ShopError::CartItemNotFound)?;
        item.quantity = quantity;
        total_of(&items)?;

        self.items = items;
        self.touch();
        Ok(())
    }

    /// Removing an id that is not in the cart is a no-op
    pub fn remove(&mut self, item_id: &LineItemId) {
        self.items.retain(|i| &i.item_id != item_id);
        self.touch();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Sum of price times quantity
    pub fn total_amount(&self) -> ShopResult<Decimal> {
        total_of(&self.items)
    }

    /// Sum of quantities
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
