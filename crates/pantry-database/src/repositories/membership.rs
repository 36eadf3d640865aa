//! Kitchen membership repository — the Membership Store.

use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_core::types::pagination::PageRequest;
use pantry_entity::membership::{KitchenMembership, MembershipStatus, MembershipUserRow};
use pantry_entity::resource::ResourceKind;

/// Filters for membership listing.
///
/// When neither `targeting_self` nor `from_self` is set the listing
/// defaults to both sides, i.e. every membership the requester
/// participates in.
#[derive(Debug, Clone, Default)]
pub struct MembershipListFilter {
    /// Only memberships where the requester is the destination user.
    pub targeting_self: bool,
    /// Only memberships where the requester is the source user.
    pub from_self: bool,
    /// Restrict to these statuses; empty means all.
    pub statuses: Vec<MembershipStatus>,
    /// Restrict by presence/absence of a share on a given resource.
    pub entity: Option<MembershipEntityFilter>,
}

/// Entity filter: find memberships that do (or do not) already carry a
/// share of the given resource. Used by share pickers in the UI.
#[derive(Debug, Clone)]
pub struct MembershipEntityFilter {
    /// Kind of the resource.
    pub kind: ResourceKind,
    /// The resource in question.
    pub resource_id: Uuid,
    /// `true` to keep memberships that have a share on the resource,
    /// `false` to keep those that do not.
    pub include: bool,
}

/// Repository for membership CRUD and participant-scoped lookups.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Create a new membership repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a pending or accepted edge already exists between the two
    /// users, in either direction. Denied edges do not count: a denied
    /// invitation may be retried.
    pub async fn edge_exists_between(&self, user_a: Uuid, user_b: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
               SELECT 1 FROM kitchen_memberships \
               WHERE status IN ('pending', 'accepted') \
                 AND ((source_user_id = $1 AND destination_user_id = $2) \
                   OR (source_user_id = $2 AND destination_user_id = $1)))",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check membership edge", e)
        })
    }

    /// Create a new pending membership from `source` to `destination`.
    pub async fn create(&self, source: Uuid, destination: Uuid) -> AppResult<KitchenMembership> {
        sqlx::query_as::<_, KitchenMembership>(
            "INSERT INTO kitchen_memberships (source_user_id, destination_user_id, status) \
             VALUES ($1, $2, 'pending') RETURNING *",
        )
        .bind(source)
        .bind(destination)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create membership", e))
    }

    /// Find a membership by ID, unscoped. Callers that act on behalf of a
    /// requester must use [`find_for_participant`](Self::find_for_participant)
    /// instead.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<KitchenMembership>> {
        sqlx::query_as::<_, KitchenMembership>("SELECT * FROM kitchen_memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Find a membership by ID, visible only to its two participants.
    pub async fn find_for_participant(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<KitchenMembership>> {
        sqlx::query_as::<_, KitchenMembership>(
            "SELECT * FROM kitchen_memberships \
             WHERE id = $1 AND (source_user_id = $2 OR destination_user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Find a membership joined with both usernames, participant-scoped.
    pub async fn find_row_for_participant(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<MembershipUserRow>> {
        sqlx::query_as::<_, MembershipUserRow>(
            "SELECT m.id, m.source_user_id, su.username AS source_username, \
                    m.destination_user_id, du.username AS destination_username, \
                    m.status, m.created_at \
             FROM kitchen_memberships m \
             JOIN users su ON su.id = m.source_user_id \
             JOIN users du ON du.id = m.destination_user_id \
             WHERE m.id = $1 AND (m.source_user_id = $2 OR m.destination_user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Update a membership's status.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: MembershipStatus,
    ) -> AppResult<KitchenMembership> {
        sqlx::query_as::<_, KitchenMembership>(
            "UPDATE kitchen_memberships SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update membership status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Membership {id} not found")))
    }

    /// Find any accepted membership between two users, treating the pair
    /// as unordered. Returns the oldest qualifying membership's ID, used
    /// only for display attribution.
    pub async fn find_accepted_between(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> AppResult<Option<Uuid>> {
        accepted_between(&self.pool, user_a, user_b).await
    }

    /// [`find_accepted_between`](Self::find_accepted_between) on an open
    /// transaction. Callers gating a write on the result must use this
    /// variant so a concurrent deny cannot land between check and write.
    pub async fn find_accepted_between_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_a: Uuid,
        user_b: Uuid,
    ) -> AppResult<Option<Uuid>> {
        accepted_between(&mut **tx, user_a, user_b).await
    }

    /// List memberships involving `user_id`, filtered and paged.
    ///
    /// Fetches one row beyond the page size; the caller turns the result
    /// into a `PageResponse`.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: &MembershipListFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<MembershipUserRow>> {
        let (targeting_self, from_self) = if !filter.targeting_self && !filter.from_self {
            (true, true)
        } else {
            (filter.targeting_self, filter.from_self)
        };

        let statuses: Vec<MembershipStatus> = if filter.statuses.is_empty() {
            MembershipStatus::ALL.to_vec()
        } else {
            filter.statuses.clone()
        };

        let (entity_kind, entity_id, entity_include) = match &filter.entity {
            Some(entity) => (Some(entity.kind), Some(entity.resource_id), entity.include),
            None => (None, None, true),
        };

        sqlx::query_as::<_, MembershipUserRow>(
            "SELECT m.id, m.source_user_id, su.username AS source_username, \
                    m.destination_user_id, du.username AS destination_username, \
                    m.status, m.created_at \
             FROM kitchen_memberships m \
             JOIN users su ON su.id = m.source_user_id \
             JOIN users du ON du.id = m.destination_user_id \
             WHERE ((m.destination_user_id = $1 AND $2) OR (m.source_user_id = $1 AND $3)) \
               AND m.status = ANY($4) \
               AND ($5::resource_kind IS NULL OR $7 = EXISTS ( \
                     SELECT 1 FROM resource_shares rs \
                     WHERE rs.membership_id = m.id \
                       AND rs.resource_kind = $5 \
                       AND rs.resource_id = $6)) \
             ORDER BY m.created_at DESC \
             LIMIT $8 OFFSET $9",
        )
        .bind(user_id)
        .bind(targeting_self)
        .bind(from_self)
        .bind(statuses)
        .bind(entity_kind)
        .bind(entity_id)
        .bind(entity_include)
        .bind(page.fetch_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list memberships", e))
    }
}

async fn accepted_between<'e>(
    executor: impl PgExecutor<'e>,
    user_a: Uuid,
    user_b: Uuid,
) -> AppResult<Option<Uuid>> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM kitchen_memberships \
         WHERE status = 'accepted' \
           AND ((source_user_id = $1 AND destination_user_id = $2) \
             OR (source_user_id = $2 AND destination_user_id = $1)) \
         ORDER BY created_at ASC LIMIT 1",
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(executor)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to find accepted membership", e)
    })
}
