//! Ledger Models — append-only balance movements and the platform treasury

use serde::{Deserialize, Serialize};

/// Which balance an entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AccountType {
    Customer,
    Restaurant,
    Treasury,
}

/// Why a balance moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LedgerEntryKind {
    OrderDebit,
    OrderCredit,
    ServiceFee,
    CashbackDebit,
    CashbackCredit,
    Topup,
}

/// Append-only ledger entry. Every balance column in the schema equals the
/// signed sum of its entries; the columns are caches, the entries are truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    pub id: i64,
    pub account_type: AccountType,
    pub account_id: i64,
    pub order_id: Option<i64>,
    pub kind: LedgerEntryKind,
    pub amount: f64,
    pub created_at: i64,
}

/// Platform treasury: the single account collecting service fees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Treasury {
    pub id: i64,
    pub total_earnings: f64,
    pub updated_at: i64,
}

/// The treasury's fixed row id.
pub const TREASURY_ID: i64 = 1;
