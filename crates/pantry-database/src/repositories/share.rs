//! Resource share repository — the Grant Store.
//!
//! One polymorphic table holds shares for all four resource kinds; the
//! `(resource_kind, resource_id, membership_id)` unique constraint is the
//! duplicate-grant guard, surfaced as `Conflict`.

use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_core::types::pagination::PageRequest;
use pantry_entity::resource::ResourceKind;
use pantry_entity::share::{ResourceShare, ShareListRow, ShareWithMembership};

/// Filters for share listing.
#[derive(Debug, Clone, Default)]
pub struct ShareListFilter {
    /// Only shares whose membership targets the requester.
    pub targeting_self: bool,
    /// Only shares whose membership was initiated by the requester.
    pub from_self: bool,
    /// Restrict to one membership.
    pub membership_id: Option<Uuid>,
}

/// Repository for share CRUD and membership-scoped lookups.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new share. A duplicate `(kind, resource, membership)`
    /// triple fails with `Conflict`.
    pub async fn create(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
        membership_id: Uuid,
    ) -> AppResult<ResourceShare> {
        sqlx::query_as::<_, ResourceShare>(
            "INSERT INTO resource_shares (resource_kind, resource_id, membership_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(kind)
        .bind(resource_id)
        .bind(membership_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!(
                    "{} has already been shared on this membership",
                    kind.label()
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create share", e)
            }
        })
    }

    /// Find a share joined with its membership's endpoints.
    pub async fn find_with_membership(&self, id: Uuid) -> AppResult<Option<ShareWithMembership>> {
        sqlx::query_as::<_, ShareWithMembership>(
            "SELECT rs.id, rs.resource_kind, rs.resource_id, rs.membership_id, \
                    m.source_user_id, m.destination_user_id, rs.created_at \
             FROM resource_shares rs \
             JOIN kitchen_memberships m ON m.id = rs.membership_id \
             WHERE rs.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Delete a share.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM resource_shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the membership granting `requester` selective access to the
    /// given resource: a share row on the resource whose membership is
    /// accepted and joins the unordered `{requester, owner}` pair.
    pub async fn find_granting_membership(
        &self,
        kind: ResourceKind,
        resource_id: Uuid,
        requester: Uuid,
        owner: Uuid,
    ) -> AppResult<Option<Uuid>> {
        granting_membership(&self.pool, kind, resource_id, requester, owner).await
    }

    /// [`find_granting_membership`](Self::find_granting_membership) on an
    /// open transaction, for callers gating a write on the result.
    pub async fn find_granting_membership_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ResourceKind,
        resource_id: Uuid,
        requester: Uuid,
        owner: Uuid,
    ) -> AppResult<Option<Uuid>> {
        granting_membership(&mut **tx, kind, resource_id, requester, owner).await
    }

    /// List shares of one resource kind involving `user_id`, with the
    /// resource name projected for display. Only shares on accepted
    /// memberships are listed; a denied membership hides its shares
    /// without deleting them.
    pub async fn list(
        &self,
        user_id: Uuid,
        kind: ResourceKind,
        filter: &ShareListFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<ShareListRow>> {
        sqlx::query_as::<_, ShareListRow>(
            "SELECT rs.id, rs.resource_kind, rs.resource_id, \
                    CASE rs.resource_kind \
                      WHEN 'cookbook' THEN \
                        (SELECT c.name FROM cookbooks c WHERE c.id = rs.resource_id) \
                      WHEN 'recipe' THEN \
                        (SELECT r.name FROM recipes r WHERE r.id = rs.resource_id) \
                      WHEN 'meal_plan' THEN \
                        (SELECT mp.name FROM meal_plans mp WHERE mp.id = rs.resource_id) \
                      ELSE \
                        (SELECT sl.name FROM shopping_lists sl WHERE sl.id = rs.resource_id) \
                    END AS resource_name, \
                    rs.membership_id, \
                    m.source_user_id, su.username AS source_username, \
                    m.destination_user_id, du.username AS destination_username, \
                    rs.created_at \
             FROM resource_shares rs \
             JOIN kitchen_memberships m ON m.id = rs.membership_id \
             JOIN users su ON su.id = m.source_user_id \
             JOIN users du ON du.id = m.destination_user_id \
             WHERE rs.resource_kind = $1 \
               AND m.status = 'accepted' \
               AND ((m.destination_user_id = $2 AND $3) OR (m.source_user_id = $2 AND $4)) \
               AND ($5::uuid IS NULL OR rs.membership_id = $5) \
             ORDER BY rs.created_at DESC \
             LIMIT $6 OFFSET $7",
        )
        .bind(kind)
        .bind(user_id)
        .bind(filter.targeting_self)
        .bind(filter.from_self)
        .bind(filter.membership_id)
        .bind(page.fetch_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }
}

async fn granting_membership<'e>(
    executor: impl PgExecutor<'e>,
    kind: ResourceKind,
    resource_id: Uuid,
    requester: Uuid,
    owner: Uuid,
) -> AppResult<Option<Uuid>> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT m.id FROM resource_shares rs \
         JOIN kitchen_memberships m ON m.id = rs.membership_id \
         WHERE rs.resource_kind = $1 \
           AND rs.resource_id = $2 \
           AND m.status = 'accepted' \
           AND ((m.source_user_id = $3 AND m.destination_user_id = $4) \
             OR (m.source_user_id = $4 AND m.destination_user_id = $3)) \
         ORDER BY m.created_at ASC LIMIT 1",
    )
    .bind(kind)
    .bind(resource_id)
    .bind(requester)
    .bind(owner)
    .fetch_optional(executor)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to find granting membership", e)
    })
}

/// Whether a sqlx error is a Postgres unique-constraint violation.
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
