//! Shop Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use auth::domain::repository::UserRepository;
use auth::{AuthGateway, require_auth};

use crate::domain::repository::ShopRepository;
use crate::presentation::handlers::{self, ShopAppState};

/// Routes mounted under `/api`; every one requires a bearer token
pub fn shop_router<R, U>(state: ShopAppState<R>, gateway: AuthGateway<U>) -> Router
where
    R: ShopRepository,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/cart", get(handlers::get_cart::<R>))
        .route("/cart/add", post(handlers::add_to_cart::<R>))
        .route(
            "/cart/item/{item_id}",
            put(handlers::update_cart_item::<R>).delete(handlers::remove_from_cart::<R>),
        )
        .route("/cart/clear", delete(handlers::clear_cart::<R>))
        .route("/wishlist", get(handlers::get_wishlist::<R>))
        .route("/wishlist/add", post(handlers::add_to_wishlist::<R>))
        .route(
            "/wishlist/item/{item_id}",
            delete(handlers::remove_from_wishlist::<R>),
        )
        .route("/wishlist/clear", delete(handlers::clear_wishlist::<R>))
        .route(
            "/orders",
            get(handlers::list_orders::<R>).post(handlers::create_order::<R>),
        )
        .route("/orders/{order_id}", get(handlers::get_order::<R>))
        .route(
            "/orders/{order_id}/status",
            put(handlers::update_order_status::<R>),
        )
        .route("/orders/{order_id}/cancel", delete(handlers::cancel_order::<R>))
        .route_layer(from_fn_with_state(gateway, require_auth::<U>))
        .with_state(state)
}
