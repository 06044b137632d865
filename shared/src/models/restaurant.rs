//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
///
/// Owned by exactly one user (`user_id` is unique). `balance` is the
/// authoritative earnings ledger for the restaurant; `rating` is derived
/// from submitted order ratings (one decimal).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub description: Option<String>,
    pub balance: f64,
    pub is_open: bool,
    pub rating: f64,
    pub display_order: i64,
    pub created_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub city: String,
    pub description: Option<String>,
}

/// Update restaurant payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub is_open: Option<bool>,
}
