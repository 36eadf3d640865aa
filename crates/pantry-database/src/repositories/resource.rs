//! Owned-resource lookups, dispatched by resource kind.
//!
//! The visibility and share paths only ever need two facts about a
//! resource: who owns it and what to call it. One repository answers that
//! for all four kinds so the callers stay kind-generic.

use sqlx::PgPool;
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::resource::{OwnedResource, ResourceKind};

/// Repository for kind-dispatched resource ownership lookups.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a resource's owner and name by kind and ID.
    pub async fn find(&self, kind: ResourceKind, id: Uuid) -> AppResult<Option<OwnedResource>> {
        let sql = match kind {
            ResourceKind::Cookbook => "SELECT id, user_id, name FROM cookbooks WHERE id = $1",
            ResourceKind::Recipe => "SELECT id, user_id, name FROM recipes WHERE id = $1",
            ResourceKind::MealPlan => "SELECT id, user_id, name FROM meal_plans WHERE id = $1",
            ResourceKind::ShoppingList => {
                "SELECT id, user_id, name FROM shopping_lists WHERE id = $1"
            }
        };

        sqlx::query_as::<_, OwnedResource>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find resource", e))
    }

    /// Find a resource owned by a specific user. Returns `None` both when
    /// the resource is absent and when it belongs to someone else; the
    /// two cases are indistinguishable by design.
    pub async fn find_owned_by(
        &self,
        kind: ResourceKind,
        id: Uuid,
        owner: Uuid,
    ) -> AppResult<Option<OwnedResource>> {
        Ok(self
            .find(kind, id)
            .await?
            .filter(|resource| resource.user_id == owner))
    }
}
