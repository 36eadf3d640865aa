//! Kitchen membership handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use pantry_core::types::pagination::PageResponse;

use crate::dto::request::{CreateMembershipRequest, MembershipListQuery, UpdateMembershipRequest};
use crate::dto::response::MembershipResponse;
use crate::error::{ApiError, validate_request};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/kitchen/membership
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMembershipRequest>,
) -> Result<Json<MembershipResponse>, ApiError> {
    validate_request(&req)?;
    let row = state
        .membership_service
        .create(auth.context(), &req.username)
        .await?;
    Ok(Json(row.into()))
}

/// PUT /api/kitchen/membership
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateMembershipRequest>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let row = state
        .membership_service
        .set_status(auth.context(), req.id, req.status)
        .await?;
    Ok(Json(row.into()))
}

/// GET /api/kitchen/membership/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let row = state.membership_service.get(auth.context(), id).await?;
    Ok(Json(row.into()))
}

/// GET /api/kitchen/membership/list
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MembershipListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PageResponse<MembershipResponse>>, ApiError> {
    let filter = query.into_filter()?;
    let page = pagination.into_page_request();
    let rows = state
        .membership_service
        .list(auth.context(), &filter, &page)
        .await?;
    Ok(Json(rows.map(MembershipResponse::from)))
}
