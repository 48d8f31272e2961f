//! PostgreSQL Repository Implementation
//!
//! Line items live in JSONB columns; carts and wishlists are upserted on
//! the unique `user_id`. Cart totals are written alongside the items on
//! every save.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{
    cart::Cart,
    line_item::{LineItem, WishlistItem},
    order::{Order, ShippingAddress},
    wishlist::Wishlist,
};
use crate::domain::repository::{CartRepository, OrderRepository, WishlistRepository};
use crate::domain::value_object::{
    order_number::OrderNumber, order_status::OrderStatus, payment_method::PaymentMethod,
};
use crate::error::{ShopError, ShopResult};

const ORDER_COLUMNS: &str = r#"
    order_id,
    user_id,
    order_number,
    items,
    total_amount,
    shipping_cost,
    tax,
    total_price,
    status,
    payment_method,
    shipping_address,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed cart, wishlist and order store
#[derive(Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgShopRepository {
    async fn find_cart(&self, user_id: &UserId) -> ShopResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT user_id, items, created_at, updated_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartRow::into_cart))
    }

    async fn save_cart(&self, cart: &Cart) -> ShopResult<()> {
        let total_items = i64::try_from(cart.total_items())
            .map_err(|_| ShopError::Internal("Cart item count overflow".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO carts (user_id, items, total_amount, total_items, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                items = EXCLUDED.items,
                total_amount = EXCLUDED.total_amount,
                total_items = EXCLUDED.total_items,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(cart.user_id.as_uuid())
        .bind(Json(&cart.items))
        .bind(cart.total_amount()?)
        .bind(total_items)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Wishlist Repository Implementation
// ============================================================================

impl WishlistRepository for PgShopRepository {
    async fn find_wishlist(&self, user_id: &UserId) -> ShopResult<Option<Wishlist>> {
        let row = sqlx::query_as::<_, WishlistRow>(
            "SELECT user_id, items, created_at, updated_at FROM wishlists WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WishlistRow::into_wishlist))
    }

    async fn save_wishlist(&self, wishlist: &Wishlist) -> ShopResult<()> {
        sqlx::query(
            r#"
            INSERT INTO wishlists (user_id, items, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                items = EXCLUDED.items,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(wishlist.user_id.as_uuid())
        .bind(Json(&wishlist.items))
        .bind(wishlist.created_at)
        .bind(wishlist.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgShopRepository {
    async fn list_orders(&self, user_id: &UserId) -> ShopResult<Vec<Order>> {
        let sql = format!(
            "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
            ORDER_COLUMNS
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    async fn find_order(&self, order_id: &OrderId, user_id: &UserId) -> ShopResult<Option<Order>> {
        let sql = format!(
            "SELECT {} FROM orders WHERE order_id = $1 AND user_id = $2",
            ORDER_COLUMNS
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn create_order(&self, order: &Order) -> ShopResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id,
                user_id,
                order_number,
                items,
                total_amount,
                shipping_cost,
                tax,
                total_price,
                status,
                payment_method,
                shipping_address,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.order_number.as_str())
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(order.shipping_cost)
        .bind(order.tax)
        .bind(order.total_price)
        .bind(order.status.as_str())
        .bind(order.payment_method.as_str())
        .bind(Json(&order.shipping_address))
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_order_status(&self, order: &Order) -> ShopResult<()> {
        sqlx::query(
            "UPDATE orders SET status = $3, updated_at = $4 WHERE order_id = $1 AND user_id = $2",
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.status.as_str())
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CartRow {
    user_id: Uuid,
    items: Json<Vec<LineItem>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartRow {
    fn into_cart(self) -> Cart {
        Cart {
            user_id: UserId::from_uuid(self.user_id),
            items: self.items.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WishlistRow {
    user_id: Uuid,
    items: Json<Vec<WishlistItem>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WishlistRow {
    fn into_wishlist(self) -> Wishlist {
        Wishlist {
            user_id: UserId::from_uuid(self.user_id),
            items: self.items.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    user_id: Uuid,
    order_number: String,
    items: Json<Vec<LineItem>>,
    total_amount: Decimal,
    shipping_cost: Decimal,
    tax: Decimal,
    total_price: Decimal,
    status: String,
    payment_method: String,
    shipping_address: Json<ShippingAddress>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> ShopResult<Order> {
        let status: OrderStatus = self
            .status
            .parse()
            .map_err(|_| ShopError::Internal(format!("Invalid stored status: {}", self.status)))?;
        let payment_method: PaymentMethod = self.payment_method.parse().map_err(|_| {
            ShopError::Internal(format!("Invalid stored payment method: {}", self.payment_method))
        })?;

        Ok(Order {
            order_id: OrderId::from_uuid(self.order_id),
            user_id: UserId::from_uuid(self.user_id),
            order_number: OrderNumber::from_db(self.order_number),
            items: self.items.0,
            total_amount: self.total_amount,
            shipping_cost: self.shipping_cost,
            tax: self.tax,
            total_price: self.total_price,
            status,
            payment_method,
            shipping_address: self.shipping_address.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
