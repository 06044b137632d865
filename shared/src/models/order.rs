//! Order Models — order rows, line snapshots, and the status state machine

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// `pending → accepted → prepared → completed`, with `pending|accepted →
/// canceled` as the alternate terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Accepted,
    Prepared,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Prepared => "prepared",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Whether `self → next` is a legal transition.
    ///
    /// Re-applying the current state is allowed (a silent rewrite).
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return !self.is_terminal();
        }
        matches!(
            (*self, next),
            (OrderStatus::Pending, OrderStatus::Accepted)
                | (OrderStatus::Accepted, OrderStatus::Prepared)
                | (OrderStatus::Prepared, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Canceled)
                | (OrderStatus::Accepted, OrderStatus::Canceled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
///
/// `total_price = original_fee + service_fee`. `original_fee` is the cart
/// subtotal (the restaurant's share); `service_fee` is the platform's cut
/// layered on top. Fees are stored at full f64 precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub total_price: f64,
    pub original_fee: f64,
    pub service_fee: f64,
    pub status: OrderStatus,
    pub cashback_applied: bool,
    pub created_at: i64,
}

/// Purchased line snapshot, decoupled from cart and menu state once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub item_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// Order with its line snapshots, as served by the order detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
