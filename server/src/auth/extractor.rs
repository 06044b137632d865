//! Actor Extractor
//!
//! Resolves the `x-user-id` header to an account row and exposes it to
//! handlers as [`CurrentUser`].

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::ServerState;
use crate::db::repository;
use crate::utils::AppError;
use shared::models::User;

/// Identity header set by the session-terminating edge.
const ACTOR_HEADER: &str = "x-user-id";

/// The authenticated actor for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let user_id: i64 = header
            .parse()
            .map_err(|_| AppError::invalid("Malformed x-user-id header"))?;

        let user = repository::user::find_by_id(&state.db.pool, user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or(AppError::Unauthorized)?;

        let current = CurrentUser { user };
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}
