//! Rating Aggregator
//!
//! One rating per completed order, submitted by the order's customer.
//! Resubmission overwrites the existing score. Every write recomputes the
//! restaurant's average, rounded to one decimal (round-half-to-even).

use std::sync::Arc;

use rust_decimal::prelude::*;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::Mutex;

use shared::models::{OrderStatus, Rating, User};

/// Rating error types
#[derive(Debug, Error)]
pub enum RatingError {
    #[error("Score must be between 0 and 5, got {0}")]
    InvalidScore(f64),

    #[error("Order {0} is not completed yet")]
    OrderNotCompleted(i64),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for RatingError {
    fn from(err: sqlx::Error) -> Self {
        RatingError::Persistence(err.to_string())
    }
}

/// Result type for rating operations
pub type RatingResult<T> = Result<T, RatingError>;

/// Round a mean score to one decimal, half-to-even.
pub fn round_rating(mean: f64) -> f64 {
    Decimal::from_f64(mean)
        .unwrap_or_default()
        .round_dp(1)
        .to_f64()
        .unwrap_or_default()
}

/// Rating aggregator over the shared pool.
#[derive(Clone)]
pub struct RatingAggregator {
    pool: SqlitePool,
    // Shared with the other SQLite writers; see SettlementEngine.
    write_lock: Arc<Mutex<()>>,
}

impl RatingAggregator {
    pub fn new(pool: SqlitePool, write_lock: Arc<Mutex<()>>) -> Self {
        Self { pool, write_lock }
    }

    /// Upsert the order's rating and recompute the restaurant average.
    pub async fn submit(&self, order_id: i64, actor: &User, score: f64) -> RatingResult<Rating> {
        if !score.is_finite() || !(0.0..=5.0).contains(&score) {
            return Err(RatingError::InvalidScore(score));
        }

        let now = shared::util::now_millis();
        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let row: Option<(i64, i64, OrderStatus)> = sqlx::query_as(
            "SELECT customer_id, restaurant_id, status FROM food_order WHERE id = ?",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (customer_id, restaurant_id, status) =
            row.ok_or(RatingError::NotFound(order_id))?;

        if customer_id != actor.id {
            return Err(RatingError::Unauthorized(
                "Only the customer who placed the order can rate it".into(),
            ));
        }
        if status != OrderStatus::Completed {
            return Err(RatingError::OrderNotCompleted(order_id));
        }

        sqlx::query(
            "INSERT INTO rating (id, order_id, restaurant_id, customer_id, score, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) ON CONFLICT(order_id) DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at",
        )
        .bind(shared::util::snowflake_id())
        .bind(order_id)
        .bind(restaurant_id)
        .bind(customer_id)
        .bind(score)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let mean: Option<f64> =
            sqlx::query_scalar("SELECT AVG(score) FROM rating WHERE restaurant_id = ?")
                .bind(restaurant_id)
                .fetch_one(&mut *tx)
                .await?;
        let average = round_rating(mean.unwrap_or(0.0));

        sqlx::query("UPDATE restaurant SET rating = ? WHERE id = ?")
            .bind(average)
            .bind(restaurant_id)
            .execute(&mut *tx)
            .await?;

        let rating = sqlx::query_as::<_, Rating>(
            "SELECT id, order_id, restaurant_id, customer_id, score, created_at, updated_at FROM rating WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| RatingError::Persistence(e.to_string()))?;

        tracing::info!(order_id, restaurant_id, score, average, "Rating recorded");
        Ok(rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_rating(2.25), 2.2);
        assert_eq!(round_rating(2.35), 2.4);
        assert_eq!(round_rating(4.75), 4.8);
        assert_eq!(round_rating(4.85), 4.8);
    }

    #[test]
    fn rounding_plain_means() {
        assert_eq!(round_rating(0.0), 0.0);
        assert_eq!(round_rating(5.0), 5.0);
        assert_eq!(round_rating(3.333333), 3.3);
        assert_eq!(round_rating(4.666666), 4.7);
    }
}
