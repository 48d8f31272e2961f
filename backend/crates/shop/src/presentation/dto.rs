//! API DTOs (Data Transfer Objects)
//!
//! Monetary amounts go over the wire as JSON numbers. Request fields are
//! optional so that missing values reach validation and produce the
//! domain's 400 messages.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    cart::Cart,
    line_item::{LineItem, WishlistItem},
    order::{Order, ShippingAddress},
    wishlist::Wishlist,
};
use crate::domain::value_object::{
    order_number::OrderNumber, order_status::OrderStatus, payment_method::PaymentMethod,
    product::ProductInput,
};
use crate::error::{ShopError, ShopResult};

// ============================================================================
// Requests
// ============================================================================

/// Product plus optional quantity, as sent to cart add, wishlist add and
/// inside order bodies
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: Option<String>,
    pub product_slug: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub quantity: Option<i64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineItemRequest {
    pub fn into_parts(self) -> (ProductInput, Option<i64>) {
        (
            ProductInput {
                product_id: self.product_id,
                product_slug: self.product_slug,
                name: self.name,
                price: self.price,
                image: self.image,
                size: self.size,
                color: self.color,
            },
            self.quantity,
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<LineItemRequest>,
    pub total_amount: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub payment_method: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

// ============================================================================
// Cart
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub total_items: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Cart> for CartView {
    type Error = ShopError;

    fn try_from(cart: Cart) -> ShopResult<Self> {
        Ok(Self {
            total_amount: cart.total_amount()?,
            total_items: cart.total_items(),
            user_id: cart.user_id,
            items: cart.items,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl CartResponse {
    pub fn new(cart: Cart, message: Option<&'static str>) -> ShopResult<Self> {
        Ok(Self {
            cart: cart.try_into()?,
            message,
        })
    }
}

// ============================================================================
// Wishlist
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub user_id: UserId,
    pub items: Vec<WishlistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Wishlist> for WishlistView {
    fn from(wishlist: Wishlist) -> Self {
        Self {
            user_id: wishlist.user_id,
            items: wishlist.items,
            created_at: wishlist.created_at,
            updated_at: wishlist.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WishlistResponse {
    pub wishlist: WishlistView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl WishlistResponse {
    pub fn new(wishlist: Wishlist, message: Option<&'static str>) -> Self {
        Self {
            wishlist: wishlist.into(),
            message,
        }
    }
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: OrderNumber,
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.order_id,
            user_id: order.user_id,
            order_number: order.order_number,
            items: order.items,
            total_amount: order.total_amount,
            shipping_cost: order.shipping_cost,
            tax: order.tax,
            total_price: order.total_price,
            status: order.status,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order: OrderView,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_request_accepts_numeric_and_string_prices() {
        let req: LineItemRequest =
            serde_json::from_str(r#"{"productId":"p-1","price":19.5,"quantity":2}"#).unwrap();
        assert_eq!(req.price, Some(Decimal::new(195, 1)));
        assert_eq!(req.quantity, Some(2));

        let req: LineItemRequest = serde_json::from_str(r#"{"price":"3.25"}"#).unwrap();
        assert_eq!(req.price, Some(Decimal::new(325, 2)));
    }

    #[test]
    fn test_cart_view_totals_are_numbers() {
        let mut cart = Cart::new(UserId::new());
        let details = crate::domain::value_object::product::ProductDetails {
            product_id: "p-1".into(),
            product_slug: "cap".into(),
            name: "Cap".into(),
            price: Decimal::new(1250, 2),
            image: None,
            size: None,
            color: None,
        };
        cart.add(details, 2).unwrap();

        let json = serde_json::to_value(CartResponse::new(cart, None).unwrap()).unwrap();
        assert_eq!(json["cart"]["totalAmount"], 25.0);
        assert_eq!(json["cart"]["totalItems"], 2);
        assert!(json.get("message").is_none());
    }
}
