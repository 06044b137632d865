//! Restaurants API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{MenuSection, Restaurant, RestaurantUpdate};

/// Query params for listing restaurants
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
}

/// List restaurants in presentation order, optionally filtered by city.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Restaurant>>>> {
    let restaurants =
        repository::restaurant::find_all(&state.db.pool, query.city.as_deref()).await?;
    Ok(ok(restaurants))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    let restaurant = repository::restaurant::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    Ok(ok(restaurant))
}

/// Full menu: categories with their items.
pub async fn menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<MenuSection>>>> {
    // 404 on unknown restaurant rather than an empty menu
    repository::restaurant::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    let sections = repository::catalog::find_menu(&state.db.pool, id).await?;
    Ok(ok(sections))
}

/// Ensure `current` owns restaurant `id`, returning the restaurant.
pub(super) async fn require_owner(
    state: &ServerState,
    current: &CurrentUser,
    id: i64,
) -> AppResult<Restaurant> {
    let restaurant = repository::restaurant::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    if restaurant.user_id != current.user.id {
        return Err(AppError::forbidden(
            "Only the restaurant owner can do this",
        ));
    }
    Ok(restaurant)
}

/// Owner: update the restaurant profile.
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    require_owner(&state, &current, id).await?;
    let restaurant = repository::restaurant::update(&state.db.pool, id, payload).await?;
    Ok(ok(restaurant))
}

#[derive(Debug, Deserialize)]
pub struct SetOpenRequest {
    pub is_open: bool,
}

/// Owner: toggle order acceptance.
pub async fn set_open(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<SetOpenRequest>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    require_owner(&state, &current, id).await?;
    let restaurant =
        repository::restaurant::set_open(&state.db.pool, id, payload.is_open).await?;
    tracing::info!(restaurant_id = id, is_open = payload.is_open, "Restaurant availability changed");
    Ok(ok(restaurant))
}
