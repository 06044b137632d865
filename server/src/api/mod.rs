//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`accounts`] - registration, balance, top-up
//! - [`restaurants`] - browsing, menu reads, owner settings
//! - [`menu`] - owner menu management (categories, items)
//! - [`cart`] - session cart mutation
//! - [`orders`] - checkout, order reads, lifecycle transitions, cashback
//! - [`ratings`] - rating submission
//! - [`admin`] - platform earnings, presentation order

pub mod accounts;
pub mod admin;
pub mod cart;
pub mod health;
pub mod menu;
pub mod orders;
pub mod ratings;
pub mod restaurants;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full application router.
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(accounts::router())
        .merge(restaurants::router())
        .merge(menu::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(ratings::router())
        .merge(admin::router())
}
