//! Accounts API Module
//!
//! Registration, balance reads and top-ups.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Accounts router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/accounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/balance", get(handler::balance))
        .route("/topup", post(handler::topup))
}
