//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Routes mounted under `/api/auth`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route_layer(from_fn_with_state(state.gateway(), require_auth::<R>));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/verify", post(handlers::verify_email::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh-token", post(handlers::refresh_token::<R>))
        .merge(protected)
        .with_state(state)
}
