//! Shared types for the Lieferspatz marketplace
//!
//! Domain models and utility types used by the server crate and by API
//! consumers. DB row types derive `sqlx::FromRow` behind the `db` feature
//! so frontend-facing builds stay free of database dependencies.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
