//! Shopping list handlers.
//!
//! Every mutation answers with the full re-sorted list, so clients never
//! have to guess where the ordering invariant moved their items.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use pantry_service::shopping_list::ShoppingListWithItems;

use crate::dto::request::{AppendItemsRequest, SetItemCompletedRequest, UpdateItemContentRequest};
use crate::error::{ApiError, validate_request};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/shopping-list/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ShoppingListWithItems>, ApiError> {
    let list = state.shopping_list_service.get(auth.context(), id).await?;
    Ok(Json(list))
}

/// POST /api/shopping-list/append-items
pub async fn append_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AppendItemsRequest>,
) -> Result<Json<ShoppingListWithItems>, ApiError> {
    validate_request(&req)?;
    let items = req.items.into_iter().map(Into::into).collect();
    let list = state
        .shopping_list_service
        .append_items(auth.context(), req.shopping_list_id, items)
        .await?;
    Ok(Json(list))
}

/// PUT /api/shopping-list/{id}/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateItemContentRequest>,
) -> Result<Json<ShoppingListWithItems>, ApiError> {
    validate_request(&req)?;
    let list = state
        .shopping_list_service
        .update_item_content(auth.context(), id, item_id, &req.content, req.notes.as_deref())
        .await?;
    Ok(Json(list))
}

/// PUT /api/shopping-list/{id}/items/{item_id}/completed
pub async fn set_item_completed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetItemCompletedRequest>,
) -> Result<Json<ShoppingListWithItems>, ApiError> {
    let list = state
        .shopping_list_service
        .set_item_completed(auth.context(), id, item_id, req.completed)
        .await?;
    Ok(Json(list))
}

/// DELETE /api/shopping-list/{id}/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ShoppingListWithItems>, ApiError> {
    let list = state
        .shopping_list_service
        .delete_item(auth.context(), id, item_id)
        .await?;
    Ok(Json(list))
}
