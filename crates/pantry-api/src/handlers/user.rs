//! User profile handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::SelfResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/self
pub async fn get_self(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SelfResponse>, ApiError> {
    let user = state.user_service.get_self(auth.context()).await?;
    Ok(Json(user.into()))
}
