//! Data models
//!
//! Shared between server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are epoch millis.

pub mod catalog;
pub mod ledger;
pub mod order;
pub mod rating;
pub mod restaurant;
pub mod user;

// Re-exports
pub use catalog::*;
pub use ledger::*;
pub use order::*;
pub use rating::*;
pub use restaurant::*;
pub use user::*;
