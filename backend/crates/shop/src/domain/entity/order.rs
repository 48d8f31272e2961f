//! Order Entity
//!
//! Orders freeze their line items and monetary totals at creation. After
//! that only the status moves.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::line_item::LineItem;
use crate::domain::value_object::{
    order_number::OrderNumber, order_status::OrderStatus, payment_method::PaymentMethod,
    product::ProductDetails,
};
use crate::error::{ShopError, ShopResult};

/// Delivery address; every field is optional free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// Validated order contents supplied by the client
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<(ProductDetails, u32)>,
    pub total_amount: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub order_number: OrderNumber,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// New order in the `confirmed` state with a fresh order number
    pub fn place(user_id: UserId, draft: OrderDraft) -> ShopResult<Self> {
        if draft.items.is_empty() {
            return Err(ShopError::validation("Order items are required"));
        }

        let now = Utc::now();
        Ok(Self {
            order_id: OrderId::new(),
            user_id,
            order_number: OrderNumber::generate(),
            items: draft
                .items
                .into_iter()
                .map(|(details, quantity)| LineItem::new(details, quantity))
                .collect(),
            total_amount: draft.total_amount,
            shipping_cost: draft.shipping_cost,
            tax: draft.tax,
            total_price: draft.total_price,
            status: OrderStatus::Confirmed,
            payment_method: draft.payment_method,
            shipping_address: draft.shipping_address,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn cancel(&mut self) -> ShopResult<()> {
        if !self.status.can_cancel() {
            return Err(ShopError::OrderNotCancellable);
        }
        self.set_status(OrderStatus::Cancelled);
        Ok(())
    }
}
