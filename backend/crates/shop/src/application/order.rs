//! Order Use Cases
//!
//! Orders are always scoped to their owner: an id that exists but belongs
//! to another user is reported as not found.

use std::str::FromStr;
use std::sync::Arc;

use kernel::id::{OrderId, UserId};
use rust_decimal::Decimal;

use crate::application::cart::parse_quantity;
use crate::domain::entity::order::{Order, OrderDraft, ShippingAddress};
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{
    money,
    order_status::OrderStatus,
    payment_method::PaymentMethod,
    product::{ProductDetails, ProductInput},
};
use crate::error::{ShopError, ShopResult};

/// Unvalidated order request
#[derive(Debug, Clone, Default)]
pub struct PlaceOrderInput {
    pub items: Vec<(ProductInput, Option<i64>)>,
    pub total_amount: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub payment_method: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

/// Non-negative, at cent precision and within the stored money range
fn amount(value: Option<Decimal>, field: &str) -> ShopResult<Decimal> {
    value
        .filter(|v| !v.is_sign_negative())
        .map(money::to_cents)
        .and_then(money::within_range)
        .ok_or_else(|| ShopError::validation(format!("Valid {} is required", field)))
}

impl PlaceOrderInput {
    fn validate(self) -> ShopResult<OrderDraft> {
        if self.items.is_empty() {
            return Err(ShopError::validation("Order items are required"));
        }

        let items = self
            .items
            .into_iter()
            .map(|(product, quantity)| {
                Ok((ProductDetails::new(product)?, parse_quantity(quantity, Some(1))?))
            })
            .collect::<ShopResult<Vec<_>>>()?;

        let payment_method = self
            .payment_method
            .as_deref()
            .map(PaymentMethod::from_str)
            .transpose()?
            .ok_or_else(|| ShopError::validation("Valid payment method is required"))?;

        Ok(OrderDraft {
            items,
            total_amount: amount(self.total_amount, "totalAmount")?,
            shipping_cost: amount(self.shipping_cost.or(Some(Decimal::ZERO)), "shippingCost")?,
            tax: amount(self.tax.or(Some(Decimal::ZERO)), "tax")?,
            total_price: amount(self.total_price, "totalPrice")?,
            payment_method,
            shipping_address: self.shipping_address.unwrap_or_default(),
        })
    }
}

pub struct OrderUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> OrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Newest first
    pub async fn list(&self, user_id: &UserId) -> ShopResult<Vec<Order>> {
        self.repo.list_orders(user_id).await
    }

    pub async fn get(&self, user_id: &UserId, order_id: &str) -> ShopResult<Order> {
        let order_id = OrderId::parse_str(order_id).map_err(|_| ShopError::OrderNotFound)?;
        self.repo
            .find_order(&order_id, user_id)
            .await?
            .ok_or(ShopError::OrderNotFound)
    }

    pub async fn place(&self, user_id: &UserId, input: PlaceOrderInput) -> ShopResult<Order> {
        let order = Order::place(*user_id, input.validate()?)?;
        self.repo.create_order(&order).await?;

        tracing::info!(
            user_id = %user_id,
            order_number = %order.order_number,
            total_price = %order.total_price,
            "Order placed"
        );
        Ok(order)
    }

    /// Any status in the enum is accepted
    pub async fn update_status(
        &self,
        user_id: &UserId,
        order_id: &str,
        status: Option<&str>,
    ) -> ShopResult<Order> {
        let status = status
            .ok_or(ShopError::InvalidStatus)
            .and_then(OrderStatus::from_str)?;

        let mut order = self.get(user_id, order_id).await?;
        order.set_status(status);
        self.repo.update_order_status(&order).await?;

        tracing::info!(order_number = %order.order_number, status = %status, "Order status updated");
        Ok(order)
    }

    /// Rejected once the order is shipped or delivered
    pub async fn cancel(&self, user_id: &UserId, order_id: &str) -> ShopResult<Order> {
        let mut order = self.get(user_id, order_id).await?;
        order.cancel()?;
        self.repo.update_order_status(&order).await?;

        tracing::info!(order_number = %order.order_number, "Order cancelled");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductInput {
        ProductInput {
            product_id: Some("p-1".into()),
            product_slug: Some("lamp".into()),
            name: Some("Lamp".into()),
            price: Some(Decimal::from(40)),
            ..ProductInput::default()
        }
    }

    fn input() -> PlaceOrderInput {
        PlaceOrderInput {
            items: vec![(product(), Some(2))],
            total_amount: Some(Decimal::from(80)),
            total_price: Some(Decimal::from(80)),
            payment_method: Some("upi".into()),
            ..PlaceOrderInput::default()
        }
    }

    #[test]
    fn test_validate_defaults() {
        let draft = input().validate().unwrap();
        assert_eq!(draft.shipping_cost, Decimal::ZERO);
        assert_eq!(draft.tax, Decimal::ZERO);
        assert_eq!(draft.payment_method, PaymentMethod::Upi);
        assert_eq!(draft.items[0].1, 2);
    }

    #[test]
    fn test_validate_rejections() {
        let cases = [
            (PlaceOrderInput { items: vec![], ..input() }, "Order items are required"),
            (PlaceOrderInput { payment_method: None, ..input() }, "Valid payment method is required"),
            (
                PlaceOrderInput { payment_method: Some("cash".into()), ..input() },
                "Valid payment method is required",
            ),
            (PlaceOrderInput { total_price: None, ..input() }, "Valid totalPrice is required"),
            (
                PlaceOrderInput { tax: Some(Decimal::from(-1)), ..input() },
                "Valid tax is required",
            ),
            (
                PlaceOrderInput { items: vec![(product(), Some(0))], ..input() },
                "Valid quantity is required",
            ),
            (
                PlaceOrderInput { total_amount: Some(Decimal::MAX), ..input() },
                "Valid totalAmount is required",
            ),
            (
                PlaceOrderInput { shipping_cost: Some(Decimal::from(1_000_000_000_000i64)), ..input() },
                "Valid shippingCost is required",
            ),
        ];

        for (input, message) in cases {
            assert_eq!(input.validate().unwrap_err().to_string(), message);
        }
    }

    #[test]
    fn test_amounts_are_rounded_to_cents() {
        let draft = PlaceOrderInput {
            tax: Some(Decimal::new(12345, 3)),
            total_price: Some(Decimal::new(9234567, 5)),
            ..input()
        }
        .validate()
        .unwrap();

        assert_eq!(draft.tax, Decimal::new(1235, 2));
        assert_eq!(draft.total_price, Decimal::new(9235, 2));
        assert_eq!(draft.total_price.scale(), 2);
    }
}
