//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::CurrentUser;

use crate::application::{CartUseCase, OrderUseCase, PlaceOrderInput, WishlistUseCase};
use crate::domain::repository::ShopRepository;
use crate::error::ShopResult;
use crate::presentation::dto::{
    CartResponse, CreateOrderRequest, LineItemRequest, OrderResponse, OrdersResponse,
    UpdateQuantityRequest, UpdateStatusRequest, WishlistResponse,
};
use crate::presentation::extract::JsonBody;

/// Shared state for shop handlers
pub struct ShopAppState<R>
where
    R: ShopRepository,
{
    pub repo: Arc<R>,
}

impl<R> ShopAppState<R>
where
    R: ShopRepository,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    fn carts(&self) -> CartUseCase<R> {
        CartUseCase::new(self.repo.clone())
    }

    fn wishlists(&self) -> WishlistUseCase<R> {
        WishlistUseCase::new(self.repo.clone())
    }

    fn orders(&self) -> OrderUseCase<R> {
        OrderUseCase::new(self.repo.clone())
    }
}

impl<R> Clone for ShopAppState<R>
where
    R: ShopRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Cart
// ============================================================================

/// GET /api/cart
pub async fn get_cart<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> ShopResult<Json<CartResponse>>
where
    R: ShopRepository,
{
    let cart = state.carts().get(&current.user_id).await?;
    Ok(Json(CartResponse::new(cart, None)?))
}

/// POST /api/cart/add
pub async fn add_to_cart<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    JsonBody(req): JsonBody<LineItemRequest>,
) -> ShopResult<Json<CartResponse>>
where
    R: ShopRepository,
{
    let (product, quantity) = req.into_parts();
    let cart = state.carts().add(&current.user_id, product, quantity).await?;
    Ok(Json(CartResponse::new(cart, Some("Item added to cart"))?))
}

/// PUT /api/cart/item/{item_id}
pub async fn update_cart_item<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(item_id): Path<String>,
    JsonBody(req): JsonBody<UpdateQuantityRequest>,
) -> ShopResult<Json<CartResponse>>
where
    R: ShopRepository,
{
    let cart = state
        .carts()
        .update_item(&current.user_id, &item_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::new(cart, Some("Cart updated"))?))
}

/// DELETE /api/cart/item/{item_id}
pub async fn remove_from_cart<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(item_id): Path<String>,
) -> ShopResult<Json<CartResponse>>
where
    R: ShopRepository,
{
    let cart = state.carts().remove_item(&current.user_id, &item_id).await?;
    Ok(Json(CartResponse::new(cart, Some("Item removed from cart"))?))
}

/// DELETE /api/cart/clear
pub async fn clear_cart<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> ShopResult<Json<CartResponse>>
where
    R: ShopRepository,
{
    let cart = state.carts().clear(&current.user_id).await?;
    Ok(Json(CartResponse::new(cart, Some("Cart cleared"))?))
}

// ============================================================================
// Wishlist
// ============================================================================

/// GET /api/wishlist
pub async fn get_wishlist<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> ShopResult<Json<WishlistResponse>>
where
    R: ShopRepository,
{
    let wishlist = state.wishlists().get(&current.user_id).await?;
    Ok(Json(WishlistResponse::new(wishlist, None)))
}

/// POST /api/wishlist/add
pub async fn add_to_wishlist<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    JsonBody(req): JsonBody<LineItemRequest>,
) -> ShopResult<Json<WishlistResponse>>
where
    R: ShopRepository,
{
    let (product, _) = req.into_parts();
    let wishlist = state.wishlists().add(&current.user_id, product).await?;
    Ok(Json(WishlistResponse::new(wishlist, Some("Item added to wishlist"))))
}

/// DELETE /api/wishlist/item/{item_id}
pub async fn remove_from_wishlist<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(item_id): Path<String>,
) -> ShopResult<Json<WishlistResponse>>
where
    R: ShopRepository,
{
    let wishlist = state
        .wishlists()
        .remove_item(&current.user_id, &item_id)
        .await?;
    Ok(Json(WishlistResponse::new(
        wishlist,
        Some("Item removed from wishlist"),
    )))
}

/// DELETE /api/wishlist/clear
pub async fn clear_wishlist<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> ShopResult<Json<WishlistResponse>>
where
    R: ShopRepository,
{
    let wishlist = state.wishlists().clear(&current.user_id).await?;
    Ok(Json(WishlistResponse::new(wishlist, Some("Wishlist cleared"))))
}

// ============================================================================
// Orders
// ============================================================================

/// GET /api/orders
pub async fn list_orders<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> ShopResult<Json<OrdersResponse>>
where
    R: ShopRepository,
{
    let orders = state.orders().list(&current.user_id).await?;
    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/orders/{order_id}
pub async fn get_order<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(order_id): Path<String>,
) -> ShopResult<Json<OrderResponse>>
where
    R: ShopRepository,
{
    let order = state.orders().get(&current.user_id, &order_id).await?;
    Ok(Json(OrderResponse {
        order: order.into(),
    }))
}

/// POST /api/orders
pub async fn create_order<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    JsonBody(req): JsonBody<CreateOrderRequest>,
) -> ShopResult<(StatusCode, Json<OrderResponse>)>
where
    R: ShopRepository,
{
    let input = PlaceOrderInput {
        items: req.items.into_iter().map(LineItemRequest::into_parts).collect(),
        total_amount: req.total_amount,
        shipping_cost: req.shipping_cost,
        tax: req.tax,
        total_price: req.total_price,
        payment_method: req.payment_method,
        shipping_address: req.shipping_address,
    };
    let order = state.orders().place(&current.user_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            order: order.into(),
        }),
    ))
}

/// PUT /api/orders/{order_id}/status
pub async fn update_order_status<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(order_id): Path<String>,
    JsonBody(req): JsonBody<UpdateStatusRequest>,
) -> ShopResult<Json<OrderResponse>>
where
    R: ShopRepository,
{
    let order = state
        .orders()
        .update_status(&current.user_id, &order_id, req.status.as_deref())
        .await?;
    Ok(Json(OrderResponse {
        order: order.into(),
    }))
}

/// DELETE /api/orders/{order_id}/cancel
pub async fn cancel_order<R>(
    State(state): State<ShopAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(order_id): Path<String>,
) -> ShopResult<Json<OrderResponse>>
where
    R: ShopRepository,
{
    let order = state.orders().cancel(&current.user_id, &order_id).await?;
    Ok(Json(OrderResponse {
        order: order.into(),
    }))
}
