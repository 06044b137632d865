//! Accounts API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::models::{
    BalanceView, Restaurant, RestaurantCreate, User, UserCreate, UserRole,
};

/// Registration payload. Restaurant signup carries the restaurant profile.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    pub restaurant: Option<RestaurantCreate>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<Restaurant>,
}

/// Create an account. Admin accounts are provisioned out of band.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<RegisterResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if payload.role == UserRole::Admin {
        return Err(AppError::forbidden("Admin accounts cannot self-register"));
    }
    if payload.role == UserRole::Restaurant && payload.restaurant.is_none() {
        return Err(AppError::validation(
            "Restaurant signup requires a restaurant profile",
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = repository::user::create(
        &state.db.pool,
        UserCreate {
            email: payload.email,
            password_hash,
            role: payload.role,
            first_name: payload.first_name,
            last_name: payload.last_name,
            location: payload.location,
            postal_code: payload.postal_code,
        },
    )
    .await?;

    let restaurant = match payload.restaurant {
        Some(data) if payload.role == UserRole::Restaurant => {
            Some(repository::restaurant::create(&state.db.pool, user.id, data).await?)
        }
        _ => None,
    };

    tracing::info!(user_id = user.id, role = %user.role, "Account registered");
    Ok(ok(RegisterResponse { user, restaurant }))
}

/// Current balance of the actor.
///
/// Customers read their own balance; owners read the owned restaurant's
/// balance (single source of truth, no mirror column); admins read the
/// treasury's running earnings.
pub async fn balance(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<BalanceView>>> {
    let user = &current.user;
    let balance = match user.role {
        UserRole::Customer => user.balance,
        UserRole::Restaurant => {
            repository::restaurant::find_by_user_id(&state.db.pool, user.id)
                .await?
                .map(|r| r.balance)
                .ok_or_else(|| AppError::not_found("No restaurant registered for this account"))?
        }
        UserRole::Admin => repository::ledger::get_treasury(&state.db.pool)
            .await?
            .total_earnings,
    };

    Ok(ok(BalanceView {
        user_id: user.id,
        role: user.role,
        balance,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TopupRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct TopupResponse {
    pub balance: f64,
}

/// Credit the actor's balance.
pub async fn topup(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<TopupRequest>,
) -> AppResult<Json<AppResponse<TopupResponse>>> {
    let balance = state
        .settlement
        .topup(&current.user, payload.amount)
        .await?;
    Ok(ok_with_message(
        TopupResponse { balance },
        "Balance topped up",
    ))
}
