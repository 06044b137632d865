//! Settlement error types

use thiserror::Error;

/// Errors raised by the settlement engine.
///
/// Validation errors (`EmptyCart`, `RestaurantClosed`, `InsufficientBalance`,
/// `MixedRestaurantCart`, `InvalidOperation`) are detected before the
/// transaction commits, so they never leave partial state behind.
/// `Persistence` is the dangerous case: the transaction itself failed — the
/// database rolls back every balance movement together.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Restaurant {0} is not accepting orders")]
    RestaurantClosed(i64),

    #[error("Insufficient balance: required {required:.2}, available {available:.2}")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("Cart holds items from more than one restaurant")]
    MixedRestaurantCart,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Settlement persistence failure: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for SettlementError {
    fn from(err: sqlx::Error) -> Self {
        SettlementError::Persistence(err.to_string())
    }
}
