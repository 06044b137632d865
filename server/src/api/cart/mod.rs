//! Cart API Module
//!
//! Session cart reads and mutations. The cart never touches the database;
//! item name and price are snapshotted from the menu at add time.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{item_id}",
            put(handler::set_quantity).delete(handler::remove_item),
        )
}
