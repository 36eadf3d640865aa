//! Shopping list repository — list lookups plus the ordering-invariant
//! maintenance on items.
//!
//! Within each partition defined by `completed`, item `order` values must
//! stay dense starting at 1. Item mutations run on a caller-supplied
//! transaction: the service opens it, re-checks visibility on it, and the
//! mutation plus the closing window-function collapse commit atomically
//! with that check, so concurrent appends, completion flips, and access
//! revocations can never interleave into a gap, a duplicate, or a write
//! past a revoked grant.

use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::shopping_list::{NewShoppingListItem, ShoppingList, ShoppingListItem};

/// Re-ranks every item of a list so each `completed` partition becomes a
/// dense 1-based sequence, preserving relative order, and returns all
/// rows in display order. Stable and idempotent.
const COLLAPSE_SQL: &str = "\
    WITH updated AS ( \
      UPDATE shopping_list_items \
      SET \"order\" = ranked.order_in_partition \
      FROM ( \
        SELECT id, row_number() OVER ( \
          PARTITION BY completed ORDER BY \"order\", id \
        ) AS order_in_partition \
        FROM shopping_list_items \
        WHERE shopping_list_id = $1 \
      ) AS ranked \
      WHERE ranked.id = shopping_list_items.id \
      RETURNING shopping_list_items.* \
    ) \
    SELECT * FROM updated ORDER BY completed ASC, \"order\" ASC";

/// Repository for shopping lists and their ordered items.
#[derive(Debug, Clone)]
pub struct ShoppingListRepository {
    pool: PgPool,
}

impl ShoppingListRepository {
    /// Create a new shopping list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction for a gated mutation.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Commit a transaction opened with [`begin`](Self::begin).
    pub async fn commit(&self, tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Find a shopping list by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShoppingList>> {
        find_list(&self.pool, id).await
    }

    /// [`find_by_id`](Self::find_by_id) on an open transaction.
    pub async fn find_by_id_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<Option<ShoppingList>> {
        find_list(&mut **tx, id).await
    }

    /// All items of a list in display order: `completed ASC, order ASC`.
    pub async fn list_items(&self, list_id: Uuid) -> AppResult<Vec<ShoppingListItem>> {
        items_in_display_order(&self.pool, list_id).await
    }

    /// Append a batch of items to the incomplete partition.
    ///
    /// Each new item lands incomplete, strictly after every pre-existing
    /// incomplete item; completed items are untouched. The base offset is
    /// the partition's maximum order, not its row count, so a gapped
    /// pre-state can never produce a tie with an existing row.
    pub async fn append_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list_id: Uuid,
        items: &[NewShoppingListItem],
    ) -> AppResult<Vec<ShoppingListItem>> {
        let base: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(\"order\"), 0) FROM shopping_list_items \
             WHERE shopping_list_id = $1 AND completed = FALSE",
        )
        .bind(list_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read max order", e))?;

        for (idx, item) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO shopping_list_items \
                 (shopping_list_id, content, notes, completed, \"order\") \
                 VALUES ($1, $2, $3, FALSE, $4)",
            )
            .bind(list_id)
            .bind(&item.content)
            .bind(&item.notes)
            .bind(base + idx as i32 + 1)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert item", e))?;
        }

        collapse_in(tx, list_id).await
    }

    /// Collapse the order values of every item in the list. Safe to call
    /// at any time; a second collapse with no intervening writes is a
    /// no-op on the resulting order values.
    pub async fn collapse(&self, list_id: Uuid) -> AppResult<Vec<ShoppingListItem>> {
        let mut tx = self.begin().await?;
        let rows = collapse_in(&mut tx, list_id).await?;
        self.commit(tx).await?;
        Ok(rows)
    }

    /// Flip an item's `completed` flag, re-appending it at the tail of
    /// its new partition, then collapse. Returns `None` if the item does
    /// not belong to the list.
    pub async fn set_item_completed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list_id: Uuid,
        item_id: Uuid,
        completed: bool,
    ) -> AppResult<Option<Vec<ShoppingListItem>>> {
        let updated = sqlx::query(
            "UPDATE shopping_list_items \
             SET completed = $3, \
                 \"order\" = 1 + ( \
                   SELECT COALESCE(MAX(\"order\"), 0) FROM shopping_list_items \
                   WHERE shopping_list_id = $1 AND completed = $3 AND id <> $2) \
             WHERE id = $2 AND shopping_list_id = $1",
        )
        .bind(list_id)
        .bind(item_id)
        .bind(completed)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(collapse_in(tx, list_id).await?))
    }

    /// Update an item's text content. Content changes leave both
    /// partitions' order values alone.
    pub async fn update_item_content(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list_id: Uuid,
        item_id: Uuid,
        content: &str,
        notes: Option<&str>,
    ) -> AppResult<Option<Vec<ShoppingListItem>>> {
        let updated = sqlx::query(
            "UPDATE shopping_list_items SET content = $3, notes = $4 \
             WHERE id = $2 AND shopping_list_id = $1",
        )
        .bind(list_id)
        .bind(item_id)
        .bind(content)
        .bind(notes)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(items_in_display_order(&mut **tx, list_id).await?))
    }

    /// Delete an item and close the gap it leaves in its partition.
    pub async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list_id: Uuid,
        item_id: Uuid,
    ) -> AppResult<Option<Vec<ShoppingListItem>>> {
        let deleted = sqlx::query(
            "DELETE FROM shopping_list_items WHERE id = $2 AND shopping_list_id = $1",
        )
        .bind(list_id)
        .bind(item_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;

        if deleted.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(collapse_in(tx, list_id).await?))
    }
}

async fn find_list<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> AppResult<Option<ShoppingList>> {
    sqlx::query_as::<_, ShoppingList>("SELECT * FROM shopping_lists WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find shopping list", e))
}

async fn items_in_display_order<'e>(
    executor: impl PgExecutor<'e>,
    list_id: Uuid,
) -> AppResult<Vec<ShoppingListItem>> {
    sqlx::query_as::<_, ShoppingListItem>(
        "SELECT * FROM shopping_list_items WHERE shopping_list_id = $1 \
         ORDER BY completed ASC, \"order\" ASC",
    )
    .bind(list_id)
    .fetch_all(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))
}

/// Run the collapse rewrite inside an open transaction.
async fn collapse_in(
    tx: &mut Transaction<'_, Postgres>,
    list_id: Uuid,
) -> AppResult<Vec<ShoppingListItem>> {
    sqlx::query_as::<_, ShoppingListItem>(COLLAPSE_SQL)
        .bind(list_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to collapse orders", e))
}
