//! Menu Management API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{Category, CategoryCreate, Item, ItemCreate, ItemUpdate};

/// Ensure `current` owns restaurant `restaurant_id`.
async fn require_owner(
    state: &ServerState,
    current: &CurrentUser,
    restaurant_id: i64,
) -> AppResult<()> {
    let restaurant = repository::restaurant::find_by_id(&state.db.pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {restaurant_id} not found")))?;
    if restaurant.user_id != current.user.id {
        return Err(AppError::forbidden(
            "Only the restaurant owner can manage the menu",
        ));
    }
    Ok(())
}

pub async fn create_category(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<AppResponse<Category>>> {
    require_owner(&state, &current, restaurant_id).await?;
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Category name must not be empty"));
    }
    let category =
        repository::catalog::create_category(&state.db.pool, restaurant_id, payload).await?;
    Ok(ok(category))
}

pub async fn create_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<AppResponse<Item>>> {
    require_owner(&state, &current, restaurant_id).await?;
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Item name must not be empty"));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::validation("Item price must be non-negative"));
    }
    let item = repository::catalog::create_item(&state.db.pool, restaurant_id, payload).await?;
    Ok(ok(item))
}

pub async fn update_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<AppResponse<Item>>> {
    let item = repository::catalog::find_item_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
    require_owner(&state, &current, item.restaurant_id).await?;
    if let Some(price) = payload.price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::validation("Item price must be non-negative"));
    }
    let item = repository::catalog::update_item(&state.db.pool, id, payload).await?;
    Ok(ok(item))
}

pub async fn delete_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let item = repository::catalog::find_item_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
    require_owner(&state, &current, item.restaurant_id).await?;
    let deleted = repository::catalog::delete_item(&state.db.pool, id).await?;
    Ok(ok(deleted))
}
