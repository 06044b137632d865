//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::models::{Order, OrderDetail, OrderStatus, UserRole};

/// Settle the session cart into an order.
///
/// No body: everything the settlement needs is session state. Failures leave
/// the cart intact for retry.
pub async fn checkout(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = state
        .settlement
        .checkout(current.user.id, &current.user)
        .await?;
    Ok(ok_with_message(detail, "Order placed"))
}

/// Orders visible to the actor: placed orders for customers, received orders
/// for restaurant owners.
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let orders = match current.user.role {
        UserRole::Customer => {
            repository::order::find_by_customer(&state.db.pool, current.user.id).await?
        }
        UserRole::Restaurant => {
            let restaurant =
                repository::restaurant::find_by_user_id(&state.db.pool, current.user.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found("No restaurant registered for this account")
                    })?;
            repository::order::find_by_restaurant(&state.db.pool, restaurant.id).await?
        }
        UserRole::Admin => {
            return Err(AppError::forbidden(
                "Admins review orders through the admin endpoints",
            ));
        }
    };
    Ok(ok(orders))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = repository::order::find_detail(&state.db.pool, id).await?;

    let allowed = match current.user.role {
        UserRole::Customer => detail.order.customer_id == current.user.id,
        UserRole::Restaurant => {
            repository::restaurant::find_by_user_id(&state.db.pool, current.user.id)
                .await?
                .map(|r| r.id == detail.order.restaurant_id)
                .unwrap_or(false)
        }
        UserRole::Admin => true,
    };
    if !allowed {
        return Err(AppError::forbidden("Not your order"));
    }

    Ok(ok(detail))
}

async fn transition(
    state: &ServerState,
    current: &CurrentUser,
    id: i64,
    next: OrderStatus,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.lifecycle.transition(id, &current.user, next).await?;
    Ok(ok(order))
}

pub async fn accept(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    transition(&state, &current, id, OrderStatus::Accepted).await
}

pub async fn prepare(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    transition(&state, &current, id, OrderStatus::Prepared).await
}

pub async fn complete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    transition(&state, &current, id, OrderStatus::Completed).await
}

pub async fn cancel(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    transition(&state, &current, id, OrderStatus::Canceled).await
}

#[derive(Debug, Deserialize)]
pub struct CashbackRequest {
    pub amount: f64,
}

/// Restaurant-initiated partial refund on a completed order.
pub async fn cashback(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CashbackRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .settlement
        .cashback(id, &current.user, payload.amount)
        .await?;
    Ok(ok_with_message((), "Cashback applied"))
}
