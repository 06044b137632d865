//! Restaurants API Module
//!
//! Public browsing plus owner-side settings.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Restaurants router
///
/// Full paths instead of a nest: the menu module registers further routes
/// under `/api/restaurants/{id}/`, which a nested prefix would shadow.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants", get(handler::list))
        .route(
            "/api/restaurants/{id}",
            get(handler::get_by_id).put(handler::update),
        )
        .route("/api/restaurants/{id}/menu", get(handler::menu))
        .route("/api/restaurants/{id}/open", put(handler::set_open))
}
