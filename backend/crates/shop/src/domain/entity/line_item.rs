//! Line Items
//!
//! Entries of carts, wishlists and orders. They serialize the same way to
//! the client and into the JSONB `items` columns.

use kernel::id::LineItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{money, product::ProductDetails};

/// Cart or order line: a product variant and a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(rename = "id")]
    pub item_id: LineItemId,
    pub product_id: String,
    pub product_slug: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LineItem {
    pub fn new(details: ProductDetails, quantity: u32) -> Self {
        Self {
            item_id: LineItemId::new(),
            product_id: details.product_id,
            product_slug: details.product_slug,
            name: details.name,
            price: details.price,
            image: details.image,
            quantity,
            size: details.size,
            color: details.color,
        }
    }

    /// Same product in the same size and color
    pub fn is_variant_of(&self, details: &ProductDetails) -> bool {
        self.product_id == details.product_id
            && self.size == details.size
            && self.color == details.color
    }

    /// `None` when price times quantity leaves the stored money range
    pub fn subtotal(&self) -> Option<Decimal> {
        money::line_total(self.price, self.quantity)
    }
}

/// Wishlist entry: a product variant without a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    #[serde(rename = "id")]
    pub item_id: LineItemId,
    pub product_id: String,
    pub product_slug: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl WishlistItem {
    pub fn new(details: ProductDetails) -> Self {
        Self {
            item_id: LineItemId::new(),
            product_id: details.product_id,
            product_slug: details.product_slug,
            name: details.name,
            price: details.price,
            image: details.image,
            size: details.size,
            color: details.color,
        }
    }

    pub fn is_variant_of(&self, details: &ProductDetails) -> bool {
        self.product_id == details.product_id
            && self.size == details.size
            && self.color == details.color
    }
}
