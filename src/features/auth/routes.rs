use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Auth routes. `/api/auth/me` needs a valid bearer token.
pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handler::get_me))
}
