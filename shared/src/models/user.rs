//! User Model

use serde::{Deserialize, Serialize};

/// Account role. Determines which operations an actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum UserRole {
    Customer,
    Restaurant,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Restaurant => "restaurant",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
///
/// `balance` is authoritative for customers only. A restaurant owner's
/// user-facing balance resolves via the owned restaurant row; admins hold no
/// money themselves (the treasury does).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub postal_code: String,
    pub balance: f64,
    pub created_at: i64,
}

/// Create user payload (internal; HTTP registration DTO lives in the API layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub postal_code: String,
}

/// Balance view returned by the accounts API.
///
/// For restaurant owners `balance` is the owned restaurant's balance; for
/// admins it is the treasury's running earnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceView {
    pub user_id: i64,
    pub role: UserRole,
    pub balance: f64,
}
