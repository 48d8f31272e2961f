//! Order Status
//!
//! ```text
//! pending -> confirmed -> shipped -> delivered
//!     \          \
//!      +----------+--> cancelled
//! ```
//!
//! Status updates are not restricted to forward moves; only cancellation is
//! guarded.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ShopError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[display("pending")]
    Pending,
    #[display("confirmed")]
    Confirmed,
    #[display("shipped")]
    Shipped,
    #[display("delivered")]
    Delivered,
    #[display("cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Orders already handed to the carrier cannot be cancelled
    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl FromStr for OrderStatus {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ShopError::InvalidStatus)
    }
}
