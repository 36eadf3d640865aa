//! Resource share handlers.
//!
//! One handler set serves all four resource kinds; the kind arrives as a
//! kebab-case path segment under `/api/share/{kind}`. An unknown kind is
//! a `NotFound`, the same as any other path that leads nowhere.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use pantry_core::error::AppError;
use pantry_core::types::pagination::PageResponse;
use pantry_entity::resource::ResourceKind;

use crate::dto::request::{CreateShareRequest, ShareListQuery};
use crate::dto::response::{MessageResponse, ShareListResponse, ShareResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

fn parse_kind(segment: &str) -> Result<ResourceKind, ApiError> {
    ResourceKind::from_path_segment(segment)
        .ok_or_else(|| ApiError(AppError::not_found(format!("Unknown resource kind: {segment}"))))
}

/// POST /api/share/{kind}
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<ShareResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let share = state
        .share_service
        .create(auth.context(), kind, req.resource_id, req.membership_id)
        .await?;
    Ok(Json(share.into()))
}

/// DELETE /api/share/{kind}/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<MessageResponse>, ApiError> {
    parse_kind(&kind)?;
    state.share_service.delete(auth.context(), id).await?;
    Ok(Json(MessageResponse {
        message: "Share revoked".to_string(),
    }))
}

/// GET /api/share/{kind}/list
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    Query(query): Query<ShareListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PageResponse<ShareListResponse>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let filter = query.into_filter();
    let page = pagination.into_page_request();
    let rows = state
        .share_service
        .list(auth.context(), kind, &filter, &page)
        .await?;
    Ok(Json(rows.map(ShareListResponse::from)))
}
