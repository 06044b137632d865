//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppResponse, AppResult, ok};
use shared::models::{Restaurant, Treasury, UserRole};

/// Treasury earnings: the running sum of all collected service fees.
pub async fn earnings(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Treasury>>> {
    current.require_role(UserRole::Admin, "Reading platform earnings")?;
    let treasury = repository::ledger::get_treasury(&state.db.pool).await?;
    Ok(ok(treasury))
}

#[derive(Debug, Deserialize)]
pub struct DisplayOrderRequest {
    pub display_order: i64,
}

/// Reorder a restaurant in customer-facing listings.
pub async fn set_display_order(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DisplayOrderRequest>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    current.require_role(UserRole::Admin, "Reordering restaurants")?;
    let restaurant =
        repository::restaurant::set_display_order(&state.db.pool, id, payload.display_order)
            .await?;
    Ok(ok(restaurant))
}
