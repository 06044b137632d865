//! Rating Model

use serde::{Deserialize, Serialize};

/// One rating per completed order (`order_id` is unique).
///
/// Resubmission updates the row in place; the restaurant average is
/// recomputed from all rating rows on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Rating {
    pub id: i64,
    pub order_id: i64,
    pub restaurant_id: i64,
    pub customer_id: i64,
    pub score: f64,
    pub created_at: i64,
    pub updated_at: i64,
}
