//! Menu Management API Module
//!
//! Owner-side category and item management. Public menu reads live in the
//! restaurants module.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Menu management router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/restaurants/{id}/categories",
            post(handler::create_category),
        )
        .route("/api/restaurants/{id}/items", post(handler::create_item))
        .route(
            "/api/items/{id}",
            axum::routing::put(handler::update_item).delete(handler::delete_item),
        )
}
