//! Order Lifecycle Manager
//!
//! Advances orders through `pending → accepted → prepared → completed`,
//! with `pending|accepted → canceled`. Transitions are performed by the
//! restaurant that received the order; re-applying the current status is a
//! silent rewrite. No transition touches balances — cancellation does not
//! refund the customer's debit (see DESIGN.md, open question 1).

use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::Mutex;

use shared::models::{Order, OrderStatus, User};

/// Lifecycle error types
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Database error: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for LifecycleError {
    fn from(err: sqlx::Error) -> Self {
        LifecycleError::Persistence(err.to_string())
    }
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Order state machine over the shared pool.
#[derive(Clone)]
pub struct LifecycleManager {
    pool: SqlitePool,
    // Shared with the other SQLite writers; see SettlementEngine.
    write_lock: Arc<Mutex<()>>,
}

impl LifecycleManager {
    pub fn new(pool: SqlitePool, write_lock: Arc<Mutex<()>>) -> Self {
        Self { pool, write_lock }
    }

    /// Move an order to `next`, enforcing actor ownership and the state
    /// machine. Returns the order in its new state.
    pub async fn transition(
        &self,
        order_id: i64,
        actor: &User,
        next: OrderStatus,
    ) -> LifecycleResult<Order> {
        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            "SELECT id, customer_id, restaurant_id, total_price, original_fee, service_fee, status, cashback_applied, created_at FROM food_order WHERE id = ?",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(LifecycleError::NotFound(order_id))?;

        let owner: Option<i64> = sqlx::query_scalar("SELECT user_id FROM restaurant WHERE id = ?")
            .bind(order.restaurant_id)
            .fetch_optional(&mut *tx)
            .await?;
        if owner != Some(actor.id) {
            return Err(LifecycleError::Unauthorized(
                "Only the restaurant that received the order can update its status".into(),
            ));
        }

        if !order.status.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        // Guarded on the status we just validated against, so a racing
        // transition on another connection cannot be silently overwritten.
        let updated = sqlx::query("UPDATE food_order SET status = ?1 WHERE id = ?2 AND status = ?3")
            .bind(next)
            .bind(order_id)
            .bind(order.status)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(LifecycleError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        tx.commit()
            .await
            .map_err(|e| LifecycleError::Persistence(e.to_string()))?;

        tracing::info!(order_id, from = %order.status, to = %next, "Order status updated");

        Ok(Order {
            status: next,
            ..order
        })
    }
}
