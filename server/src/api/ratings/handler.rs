//! Ratings API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_with_message};
use shared::models::Rating;

#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub score: f64,
}

/// Rate a completed order. Resubmission overwrites the previous score.
pub async fn submit(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<SubmitRatingRequest>,
) -> AppResult<Json<AppResponse<Rating>>> {
    let rating = state
        .ratings
        .submit(id, &current.user, payload.score)
        .await?;
    Ok(ok_with_message(rating, "Rating recorded"))
}
