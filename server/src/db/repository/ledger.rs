//! Ledger Repository
//!
//! Read access to the append-only ledger. Entries are only ever written by
//! the settlement engine, inside its transactions.

use super::RepoResult;
use shared::models::{AccountType, LedgerEntry, Treasury};
use sqlx::SqlitePool;

pub async fn find_by_account(
    pool: &SqlitePool,
    account_type: AccountType,
    account_id: i64,
) -> RepoResult<Vec<LedgerEntry>> {
    let rows = sqlx::query_as::<_, LedgerEntry>(
        "SELECT id, account_type, account_id, order_id, kind, amount, created_at FROM ledger_entry WHERE account_type = ? AND account_id = ? ORDER BY created_at, id",
    )
    .bind(account_type)
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Signed sum of an account's entries. The balance columns are caches of
/// this value; the two agree unless someone bypassed the engine.
pub async fn account_sum(
    pool: &SqlitePool,
    account_type: AccountType,
    account_id: i64,
) -> RepoResult<f64> {
    let sum: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(amount) FROM ledger_entry WHERE account_type = ? AND account_id = ?",
    )
    .bind(account_type)
    .bind(account_id)
    .fetch_one(pool)
    .await?;
    Ok(sum.unwrap_or(0.0))
}

pub async fn get_treasury(pool: &SqlitePool) -> RepoResult<Treasury> {
    let row = sqlx::query_as::<_, Treasury>(
        "SELECT id, total_earnings, updated_at FROM treasury WHERE id = ?",
    )
    .bind(shared::models::TREASURY_ID)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
