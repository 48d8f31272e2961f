//! API Application
//!
//! Router assembly and environment configuration for the server binary.
//! Kept in a library so the HTTP tests can drive the exact router the
//! binary serves.

pub mod config;

use std::any::Any;

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, auth_router};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use shop::{ShopAppState, ShopRepository, shop_router};
use tower_http::catch_panic::CatchPanicLayer;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub const SERVICE_NAME: &str = "E-commerce Backend API";

/// Full application router without transport layers (CORS, tracing)
pub fn app<U, S>(auth: AuthAppState<U>, shop: ShopAppState<S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: ShopRepository,
{
    let gateway = auth.gateway();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/auth", auth_router(auth))
        .nest("/api", shop_router(shop, gateway))
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// GET /
async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "status": "ok",
        "health": "/health",
    }))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = %detail, "Request handler panicked");
    AppError::internal(detail.to_string()).into_response()
}
