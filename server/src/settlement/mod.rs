//! Settlement Module — the order checkout and ledger workflow
//!
//! Converts a session cart into a persisted order and moves money between
//! the three balance holders (customer, restaurant, treasury) as one SQLite
//! transaction. Also handles cashback and balance top-ups: every balance
//! movement in the system goes through [`SettlementEngine`] and leaves an
//! append-only ledger entry behind.

mod engine;
mod error;
pub mod money;

pub use engine::SettlementEngine;
pub use error::SettlementError;
