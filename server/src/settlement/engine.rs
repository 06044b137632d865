//! SettlementEngine - checkout, cashback and top-up processing
//!
//! Every balance movement runs inside one SQLite transaction:
//!
//! ```text
//! checkout(session, customer)
//!     ├─ 1. Validate cart (non-empty, single restaurant, sane lines)
//!     ├─ 2. Compute fee split (Decimal)
//!     ├─ 3. Begin transaction
//!     ├─ 4. Restaurant open check
//!     ├─ 5. Insert order + line snapshots
//!     ├─ 6. Guarded customer debit (balance = balance - x WHERE balance >= x)
//!     ├─ 7. Restaurant credit, treasury credit (atomic increments)
//!     ├─ 8. Append ledger entries
//!     ├─ 9. Commit
//!     └─ 10. Clear the session cart (only after commit)
//! ```
//!
//! A failure anywhere before step 9 rolls the whole transaction back: the
//! customer is never charged without an order existing, and the cart stays
//! intact for retry.

use std::sync::Arc;

use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::Mutex;

use crate::cart::CartStore;
use crate::settlement::money;
use crate::settlement::SettlementError;
use shared::models::{
    AccountType, LedgerEntryKind, Order, OrderDetail, OrderItem, OrderStatus, Restaurant,
    TREASURY_ID, User, UserRole,
};

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;

/// SettlementEngine — the only writer of balances and ledger entries.
#[derive(Clone)]
pub struct SettlementEngine {
    pool: SqlitePool,
    carts: Arc<CartStore>,
    // SQLite allows one writer; write transactions that read first must not
    // interleave or the later one aborts with BUSY_SNAPSHOT. All writers
    // (settlement, lifecycle, ratings) share this lock.
    write_lock: Arc<Mutex<()>>,
}

impl SettlementEngine {
    pub fn new(pool: SqlitePool, carts: Arc<CartStore>, write_lock: Arc<Mutex<()>>) -> Self {
        Self {
            pool,
            carts,
            write_lock,
        }
    }

    /// Settle the session's cart into an order.
    ///
    /// On success the cart is cleared and the persisted order (with line
    /// snapshots) is returned. On any error the cart and all balances are
    /// untouched.
    pub async fn checkout(&self, session: i64, customer: &User) -> SettlementResult<OrderDetail> {
        if customer.role != UserRole::Customer {
            return Err(SettlementError::Unauthorized(
                "Only customers can check out".into(),
            ));
        }

        let cart = self.carts.get(session);
        if cart.is_empty() {
            return Err(SettlementError::EmptyCart);
        }
        for line in cart.lines() {
            money::validate_cart_line(line)?;
        }
        // The cart store already enforces this; guard again in case a cart
        // was assembled by some other path.
        let restaurant_id = cart.restaurant_id().ok_or(SettlementError::EmptyCart)?;
        if cart.lines().any(|l| l.restaurant_id != restaurant_id) {
            return Err(SettlementError::MixedRestaurantCart);
        }

        let split = money::split_subtotal(money::cart_subtotal(&cart));
        let now = shared::util::now_millis();
        let order_id = shared::util::snowflake_id();

        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let restaurant = sqlx::query_as::<_, Restaurant>(
            "SELECT id, user_id, name, address, city, description, balance, is_open, rating, display_order, created_at FROM restaurant WHERE id = ?",
        )
        .bind(restaurant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| SettlementError::NotFound(format!("Restaurant {restaurant_id} not found")))?;

        if !restaurant.is_open {
            return Err(SettlementError::RestaurantClosed(restaurant_id));
        }

        // Friendly precondition read; the guarded decrement below is what
        // actually protects against racing checkouts.
        let available: f64 = sqlx::query_scalar("SELECT balance FROM user WHERE id = ?")
            .bind(customer.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| SettlementError::NotFound(format!("User {} not found", customer.id)))?;
        if money::to_decimal(available) < money::to_decimal(split.total_fee) {
            return Err(SettlementError::InsufficientBalance {
                required: split.total_fee,
                available,
            });
        }

        sqlx::query(
            "INSERT INTO food_order (id, customer_id, restaurant_id, total_price, original_fee, service_fee, status, cashback_applied, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
        )
        .bind(order_id)
        .bind(customer.id)
        .bind(restaurant_id)
        .bind(split.total_fee)
        .bind(split.original_fee)
        .bind(split.service_fee)
        .bind(OrderStatus::Pending)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(cart.lines().count());
        for line in cart.lines() {
            let line_id = shared::util::snowflake_id();
            sqlx::query(
                "INSERT INTO order_item (id, order_id, item_id, name, price, quantity) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(line_id)
            .bind(order_id)
            .bind(line.item_id)
            .bind(&line.name)
            .bind(line.price)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
            items.push(OrderItem {
                id: line_id,
                order_id,
                item_id: line.item_id,
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            });
        }

        // Guarded atomic decrement: a concurrent settlement that got here
        // first has already shrunk the balance, so the WHERE clause re-checks.
        let debited =
            sqlx::query("UPDATE user SET balance = balance - ?1 WHERE id = ?2 AND balance >= ?1")
                .bind(split.total_fee)
                .bind(customer.id)
                .execute(&mut *tx)
                .await?;
        if debited.rows_affected() == 0 {
            return Err(SettlementError::InsufficientBalance {
                required: split.total_fee,
                available,
            });
        }

        sqlx::query("UPDATE restaurant SET balance = balance + ? WHERE id = ?")
            .bind(split.original_fee)
            .bind(restaurant_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE treasury SET total_earnings = total_earnings + ?, updated_at = ? WHERE id = ?")
            .bind(split.service_fee)
            .bind(now)
            .bind(TREASURY_ID)
            .execute(&mut *tx)
            .await?;

        append_entry(
            &mut tx,
            AccountType::Customer,
            customer.id,
            Some(order_id),
            LedgerEntryKind::OrderDebit,
            -split.total_fee,
            now,
        )
        .await?;
        append_entry(
            &mut tx,
            AccountType::Restaurant,
            restaurant_id,
            Some(order_id),
            LedgerEntryKind::OrderCredit,
            split.original_fee,
            now,
        )
        .await?;
        append_entry(
            &mut tx,
            AccountType::Treasury,
            TREASURY_ID,
            Some(order_id),
            LedgerEntryKind::ServiceFee,
            split.service_fee,
            now,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| SettlementError::Persistence(e.to_string()))?;

        // Only a committed settlement consumes the cart.
        self.carts.clear(session);

        tracing::info!(
            order_id,
            customer_id = customer.id,
            restaurant_id,
            total = split.total_fee,
            service_fee = split.service_fee,
            "Order settled"
        );

        Ok(OrderDetail {
            order: Order {
                id: order_id,
                customer_id: customer.id,
                restaurant_id,
                total_price: split.total_fee,
                original_fee: split.original_fee,
                service_fee: split.service_fee,
                status: OrderStatus::Pending,
                cashback_applied: false,
                created_at: now,
            },
            items,
        })
    }

    /// Move `amount` from the restaurant's balance back to the customer.
    ///
    /// Only the restaurant that owns the order, only on completed orders,
    /// only once per order, and only for `0 < amount <= total_price`.
    pub async fn cashback(
        &self,
        order_id: i64,
        actor: &User,
        amount: f64,
    ) -> SettlementResult<()> {
        money::validate_amount(amount)?;

        let now = shared::util::now_millis();
        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            "SELECT id, customer_id, restaurant_id, total_price, original_fee, service_fee, status, cashback_applied, created_at FROM food_order WHERE id = ?",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| SettlementError::NotFound(format!("Order {order_id} not found")))?;

        let owner: Option<i64> = sqlx::query_scalar("SELECT user_id FROM restaurant WHERE id = ?")
            .bind(order.restaurant_id)
            .fetch_optional(&mut *tx)
            .await?;
        if owner != Some(actor.id) {
            return Err(SettlementError::Unauthorized(
                "Only the restaurant that received the order can grant cashback".into(),
            ));
        }

        if order.status != OrderStatus::Completed {
            return Err(SettlementError::InvalidOperation(format!(
                "Cashback requires a completed order, order is {}",
                order.status
            )));
        }
        if order.cashback_applied {
            return Err(SettlementError::InvalidOperation(
                "Cashback has already been applied to this order".into(),
            ));
        }
        if money::to_decimal(amount) > money::to_decimal(order.total_price) {
            return Err(SettlementError::InvalidOperation(format!(
                "Cashback amount {:.2} exceeds order total {:.2}",
                amount, order.total_price
            )));
        }

        let debited = sqlx::query(
            "UPDATE restaurant SET balance = balance - ?1 WHERE id = ?2 AND balance >= ?1",
        )
        .bind(amount)
        .bind(order.restaurant_id)
        .execute(&mut *tx)
        .await?;
        if debited.rows_affected() == 0 {
            let available: f64 = sqlx::query_scalar("SELECT balance FROM restaurant WHERE id = ?")
                .bind(order.restaurant_id)
                .fetch_one(&mut *tx)
                .await?;
            return Err(SettlementError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        sqlx::query("UPDATE user SET balance = balance + ? WHERE id = ?")
            .bind(amount)
            .bind(order.customer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE food_order SET cashback_applied = 1 WHERE id = ?")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        append_entry(
            &mut tx,
            AccountType::Restaurant,
            order.restaurant_id,
            Some(order_id),
            LedgerEntryKind::CashbackDebit,
            -amount,
            now,
        )
        .await?;
        append_entry(
            &mut tx,
            AccountType::Customer,
            order.customer_id,
            Some(order_id),
            LedgerEntryKind::CashbackCredit,
            amount,
            now,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| SettlementError::Persistence(e.to_string()))?;

        tracing::info!(order_id, amount, "Cashback applied");
        Ok(())
    }

    /// Credit a customer's balance (the platform's payment provider boundary).
    ///
    /// Returns the new balance.
    pub async fn topup(&self, user: &User, amount: f64) -> SettlementResult<f64> {
        if user.role != UserRole::Customer {
            return Err(SettlementError::Unauthorized(
                "Only customer accounts hold a spendable balance".into(),
            ));
        }
        money::validate_amount(amount)?;

        let now = shared::util::now_millis();
        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE user SET balance = balance + ? WHERE id = ?")
            .bind(amount)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(SettlementError::NotFound(format!(
                "User {} not found",
                user.id
            )));
        }

        append_entry(
            &mut tx,
            AccountType::Customer,
            user.id,
            None,
            LedgerEntryKind::Topup,
            amount,
            now,
        )
        .await?;

        let balance: f64 = sqlx::query_scalar("SELECT balance FROM user WHERE id = ?")
            .bind(user.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| SettlementError::Persistence(e.to_string()))?;

        Ok(balance)
    }
}

/// Append one signed ledger entry inside the caller's transaction.
async fn append_entry(
    tx: &mut Transaction<'_, Sqlite>,
    account_type: AccountType,
    account_id: i64,
    order_id: Option<i64>,
    kind: LedgerEntryKind,
    amount: f64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO ledger_entry (id, account_type, account_id, order_id, kind, amount, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(shared::util::snowflake_id())
    .bind(account_type)
    .bind(account_id)
    .bind(order_id)
    .bind(kind)
    .bind(amount)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
