//! Ratings API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Ratings router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders/{id}/rating", post(handler::submit))
}
