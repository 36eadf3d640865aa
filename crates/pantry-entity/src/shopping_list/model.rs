//! Shopping list entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A shopping list owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingList {
    /// Unique list identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
}

/// One line on a shopping list.
///
/// Ordering invariant: within each partition defined by `completed`, the
/// `order` values of a list's items form a dense sequence starting at 1.
/// The two partitions are independent, so an incomplete item and a
/// completed item can both carry `order = 1`. Consumers always read back
/// ordered by `completed ASC, "order" ASC`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingListItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Owning shopping list.
    pub shopping_list_id: Uuid,
    /// Item text ("2lb flour").
    pub content: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Whether the item has been checked off.
    pub completed: bool,
    /// Position within the item's `completed` partition, 1-based.
    #[serde(rename = "order")]
    #[sqlx(rename = "order")]
    pub order: i32,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Data for a not-yet-inserted item, as supplied by append callers.
/// `completed` and `order` are assigned by the store, never the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShoppingListItem {
    /// Item text.
    pub content: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
}
