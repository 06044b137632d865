//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::cart::Cart;
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::UserRole;

pub async fn get_cart(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Cart>>> {
    current.require_role(UserRole::Customer, "Shopping")?;
    Ok(ok(state.carts.get(current.user.id)))
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

pub async fn add_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<AppResponse<Cart>>> {
    current.require_role(UserRole::Customer, "Shopping")?;

    let item = repository::catalog::find_item_by_id(&state.db.pool, payload.item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {} not found", payload.item_id)))?;

    let cart = state
        .carts
        .add_item(current.user.id, &item, payload.quantity)?;
    Ok(ok(cart))
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

pub async fn set_quantity(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(item_id): Path<i64>,
    Json(payload): Json<SetQuantityRequest>,
) -> AppResult<Json<AppResponse<Cart>>> {
    current.require_role(UserRole::Customer, "Shopping")?;
    let cart = state
        .carts
        .set_quantity(current.user.id, item_id, payload.quantity)?;
    Ok(ok(cart))
}

pub async fn remove_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(item_id): Path<i64>,
) -> AppResult<Json<AppResponse<Cart>>> {
    current.require_role(UserRole::Customer, "Shopping")?;
    let cart = state.carts.remove_item(current.user.id, item_id)?;
    Ok(ok(cart))
}

pub async fn clear(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Cart>>> {
    current.require_role(UserRole::Customer, "Shopping")?;
    state.carts.clear(current.user.id);
    Ok(ok(state.carts.get(current.user.id)))
}
