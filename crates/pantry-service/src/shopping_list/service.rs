//! Shopping list reads and item mutations, gated by the visibility
//! resolver.
//!
//! Every entry point resolves visibility first. A list the requester may
//! not see is reported as `NotFound` whether it exists or not, and item
//! IDs inside an invisible list are never checked at all. Mutations
//! resolve visibility on the same transaction as the write, so a grant
//! revoked mid-request rolls the write back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use pantry_access::resolver::VisibilityResolver;
use pantry_access::tier::AccessOp;
use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::shopping_list::ShoppingListRepository;
use pantry_entity::resource::ResourceKind;
use pantry_entity::shopping_list::{NewShoppingListItem, ShoppingList, ShoppingListItem};

use crate::context::RequestContext;

/// A shopping list together with its items in display order
/// (`completed ASC, order ASC`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListWithItems {
    /// The list itself.
    #[serde(flatten)]
    pub list: ShoppingList,
    /// Items, incomplete partition first, each partition densely ordered.
    pub items: Vec<ShoppingListItem>,
}

/// Manages shopping list access and item mutations.
#[derive(Debug, Clone)]
pub struct ShoppingListService {
    /// Shopping list repository.
    list_repo: Arc<ShoppingListRepository>,
    /// Visibility resolver gating every entry point.
    resolver: Arc<VisibilityResolver>,
}

impl ShoppingListService {
    /// Creates a new shopping list service.
    pub fn new(list_repo: Arc<ShoppingListRepository>, resolver: Arc<VisibilityResolver>) -> Self {
        Self {
            list_repo,
            resolver,
        }
    }

    /// Fetches a list with its items in display order.
    pub async fn get(&self, ctx: &RequestContext, list_id: Uuid) -> AppResult<ShoppingListWithItems> {
        let list = self.visible_list(ctx, list_id).await?;
        let items = self.list_repo.list_items(list.id).await?;
        Ok(ShoppingListWithItems { list, items })
    }

    /// Appends a batch of items to the incomplete partition of a list,
    /// after every pre-existing incomplete item. Returns the full
    /// re-sorted list.
    pub async fn append_items(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        items: Vec<NewShoppingListItem>,
    ) -> AppResult<ShoppingListWithItems> {
        if items.is_empty() {
            return Err(AppError::validation("Provide at least one item to append"));
        }

        let mut tx = self.list_repo.begin().await?;
        let list = self.writable_list(&mut tx, ctx, list_id).await?;
        let appended = items.len();
        let items = self.list_repo.append_items(&mut tx, list.id, &items).await?;
        self.list_repo.commit(tx).await?;

        info!(list_id = %list.id, appended, "Shopping list items appended");
        Ok(ShoppingListWithItems { list, items })
    }

    /// Checks an item off or un-checks it. The item re-enters its new
    /// partition at the tail.
    pub async fn set_item_completed(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        item_id: Uuid,
        completed: bool,
    ) -> AppResult<ShoppingListWithItems> {
        let mut tx = self.list_repo.begin().await?;
        let list = self.writable_list(&mut tx, ctx, list_id).await?;
        let items = self
            .list_repo
            .set_item_completed(&mut tx, list.id, item_id, completed)
            .await?
            .ok_or_else(|| item_not_found(item_id))?;
        self.list_repo.commit(tx).await?;

        info!(list_id = %list.id, item_id = %item_id, completed, "Shopping list item flipped");
        Ok(ShoppingListWithItems { list, items })
    }

    /// Rewrites an item's content and notes. Order values are untouched.
    pub async fn update_item_content(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        item_id: Uuid,
        content: &str,
        notes: Option<&str>,
    ) -> AppResult<ShoppingListWithItems> {
        let mut tx = self.list_repo.begin().await?;
        let list = self.writable_list(&mut tx, ctx, list_id).await?;
        let items = self
            .list_repo
            .update_item_content(&mut tx, list.id, item_id, content, notes)
            .await?
            .ok_or_else(|| item_not_found(item_id))?;
        self.list_repo.commit(tx).await?;

        Ok(ShoppingListWithItems { list, items })
    }

    /// Deletes an item; its partition closes the gap.
    pub async fn delete_item(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        item_id: Uuid,
    ) -> AppResult<ShoppingListWithItems> {
        let mut tx = self.list_repo.begin().await?;
        let list = self.writable_list(&mut tx, ctx, list_id).await?;
        let items = self
            .list_repo
            .delete_item(&mut tx, list.id, item_id)
            .await?
            .ok_or_else(|| item_not_found(item_id))?;
        self.list_repo.commit(tx).await?;

        info!(list_id = %list.id, item_id = %item_id, "Shopping list item deleted");
        Ok(ShoppingListWithItems { list, items })
    }

    /// Loads the list and resolves read visibility, mapping both
    /// "absent" and "not visible" to the same `NotFound`.
    async fn visible_list(&self, ctx: &RequestContext, list_id: Uuid) -> AppResult<ShoppingList> {
        let not_found = || AppError::not_found(format!("Shopping list {list_id} not found"));

        let list = self
            .list_repo
            .find_by_id(list_id)
            .await?
            .ok_or_else(not_found)?;

        let visibility = self
            .resolver
            .resolve(
                ctx.user_id,
                list.user_id,
                ResourceKind::ShoppingList,
                list.id,
                AccessOp::Read,
            )
            .await?;

        if !visibility.visible {
            return Err(not_found());
        }

        Ok(list)
    }

    /// [`visible_list`](Self::visible_list) for mutations: loads the list
    /// and resolves write visibility on the caller's transaction, so the
    /// grant still holds when the mutation commits. An accepted
    /// membership denied after this check rolls the whole write back.
    async fn writable_list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ctx: &RequestContext,
        list_id: Uuid,
    ) -> AppResult<ShoppingList> {
        let not_found = || AppError::not_found(format!("Shopping list {list_id} not found"));

        let list = self
            .list_repo
            .find_by_id_in(tx, list_id)
            .await?
            .ok_or_else(not_found)?;

        let visibility = self
            .resolver
            .resolve_in(
                tx,
                ctx.user_id,
                list.user_id,
                ResourceKind::ShoppingList,
                list.id,
                AccessOp::Write,
            )
            .await?;

        if !visibility.visible {
            return Err(not_found());
        }

        Ok(list)
    }
}

fn item_not_found(item_id: Uuid) -> AppError {
    AppError::not_found(format!("Shopping list item {item_id} not found"))
}
