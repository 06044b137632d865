//! Server state — shared service singletons

use std::sync::Arc;

use crate::cart::CartStore;
use crate::core::Config;
use crate::db::DbService;
use crate::lifecycle::LifecycleManager;
use crate::ratings::RatingAggregator;
use crate::settlement::SettlementEngine;
use crate::utils::AppError;

/// Shared state handed to every handler. `Clone` is cheap: the pool and the
/// cart store are reference-counted, everything else is small.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite pool (WAL)
    pub db: DbService,
    /// Per-session carts
    pub carts: Arc<CartStore>,
    /// Checkout / cashback / top-up processing
    pub settlement: SettlementEngine,
    /// Order status state machine
    pub lifecycle: LifecycleManager,
    /// Rating upserts + average recompute
    pub ratings: RatingAggregator,
}

impl ServerState {
    /// Initialize state: working directory, database (with migrations), and
    /// the domain services on top of the pool.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::with_db(config.clone(), db))
    }

    /// Build state on an already-opened database (tests hand in their own).
    pub fn with_db(config: Config, db: DbService) -> Self {
        let carts = Arc::new(CartStore::new());
        // One writer at a time keeps SQLite write transactions from aborting
        // with BUSY_SNAPSHOT under contention.
        let write_lock = Arc::new(tokio::sync::Mutex::new(()));
        let settlement = SettlementEngine::new(db.pool.clone(), carts.clone(), write_lock.clone());
        let lifecycle = LifecycleManager::new(db.pool.clone(), write_lock.clone());
        let ratings = RatingAggregator::new(db.pool.clone(), write_lock);
        Self {
            config,
            db,
            carts,
            settlement,
            lifecycle,
            ratings,
        }
    }
}
