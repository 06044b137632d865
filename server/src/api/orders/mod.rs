//! Orders API Module
//!
//! Checkout, order reads, lifecycle transitions and cashback. All balance
//! movements go through the settlement engine; transitions go through the
//! lifecycle manager.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Orders router
///
/// Full paths instead of a nest: the ratings module registers
/// `/api/orders/{id}/rating`, which a nested prefix would shadow.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders/checkout", post(handler::checkout))
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/accept", post(handler::accept))
        .route("/api/orders/{id}/prepare", post(handler::prepare))
        .route("/api/orders/{id}/complete", post(handler::complete))
        .route("/api/orders/{id}/cancel", post(handler::cancel))
        .route("/api/orders/{id}/cashback", post(handler::cashback))
}
