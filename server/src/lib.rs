//! Lieferspatz Server - food-delivery marketplace backend
//!
//! # Architecture
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # actor identity, password hashing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool + repositories
//! ├── cart/          # per-session cart store
//! ├── settlement/    # checkout / cashback / top-up ledger engine
//! ├── lifecycle/     # order status state machine
//! ├── ratings/       # rating aggregator
//! └── utils/         # errors, logging
//! ```
//!
//! Money flow invariant: every balance mutation goes through the settlement
//! engine, runs in one SQLite transaction, and leaves append-only ledger
//! entries behind. Balances are caches of the ledger.

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod ratings;
pub mod settlement;
pub mod utils;

// Re-export public types
pub use auth::CurrentUser;
pub use cart::{Cart, CartStore};
pub use core::{Config, Server, ServerState};
pub use lifecycle::LifecycleManager;
pub use ratings::RatingAggregator;
pub use settlement::SettlementEngine;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
