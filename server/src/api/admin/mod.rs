//! Admin API Module
//!
//! Platform oversight: treasury earnings and restaurant presentation order.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Admin router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/earnings", get(handler::earnings))
        .route(
            "/restaurants/{id}/display-order",
            put(handler::set_display_order),
        )
}
