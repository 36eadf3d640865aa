//! Membership invitation and approval service.
//!
//! Everything here is participant-scoped: a membership is invisible to
//! anyone who is not one of its two endpoints, and "invisible" always
//! means `NotFound`, never a distinct forbidden error.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_core::types::pagination::{PageRequest, PageResponse};
use pantry_database::repositories::membership::{MembershipListFilter, MembershipRepository};
use pantry_database::repositories::user::UserRepository;
use pantry_entity::membership::{MembershipStatus, MembershipUserRow};

use crate::context::RequestContext;

/// Manages membership invitations, approval, and listing.
#[derive(Debug, Clone)]
pub struct MembershipService {
    /// Membership repository.
    membership_repo: Arc<MembershipRepository>,
    /// User repository, for invite-by-username resolution.
    user_repo: Arc<UserRepository>,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(membership_repo: Arc<MembershipRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            membership_repo,
            user_repo,
        }
    }

    /// Invites another user by username, creating a `pending` membership.
    ///
    /// Fails `NotFound` when the username does not resolve, `Validation`
    /// on a self-invite, and `Conflict` when a pending or accepted edge
    /// already exists between the pair in either direction. A previously
    /// denied invitation does not block a retry.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        destination_username: &str,
    ) -> AppResult<MembershipUserRow> {
        let destination = self
            .user_repo
            .find_by_username(destination_username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {destination_username} not found")))?;

        if destination.id == ctx.user_id {
            return Err(AppError::validation("Cannot invite yourself"));
        }

        if self
            .membership_repo
            .edge_exists_between(ctx.user_id, destination.id)
            .await?
        {
            return Err(AppError::conflict(format!(
                "A membership with {} already exists",
                destination.username
            )));
        }

        let membership = self
            .membership_repo
            .create(ctx.user_id, destination.id)
            .await?;

        info!(
            membership_id = %membership.id,
            source = %ctx.user_id,
            destination = %destination.id,
            "Membership invitation created"
        );

        Ok(MembershipUserRow {
            id: membership.id,
            source_user_id: ctx.user_id,
            source_username: ctx.username.clone(),
            destination_user_id: destination.id,
            destination_username: destination.username,
            status: membership.status,
            created_at: membership.created_at,
        })
    }

    /// Transitions a membership's status.
    ///
    /// Only the destination user decides: `pending -> accepted`,
    /// `pending -> denied`, and later flips between `accepted` and
    /// `denied` are all theirs. No status ever returns to `pending`.
    /// Non-participants get `NotFound`; participants asking for an
    /// illegal transition get `Validation`.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        membership_id: Uuid,
        new_status: MembershipStatus,
    ) -> AppResult<MembershipUserRow> {
        let membership = self
            .membership_repo
            .find_for_participant(membership_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Membership {membership_id} not found")))?;

        if !membership.status.can_transition_to(new_status) {
            return Err(AppError::validation(format!(
                "Cannot change membership status from {} to {}",
                membership.status.as_str(),
                new_status.as_str()
            )));
        }

        if ctx.user_id != membership.destination_user_id {
            return Err(AppError::validation(
                "Only the invited user may change the membership status",
            ));
        }

        self.membership_repo
            .update_status(membership_id, new_status)
            .await?;

        info!(
            membership_id = %membership_id,
            status = new_status.as_str(),
            "Membership status updated"
        );

        self.membership_repo
            .find_row_for_participant(membership_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Membership {membership_id} not found")))
    }

    /// Fetches one membership, visible only to its participants.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        membership_id: Uuid,
    ) -> AppResult<MembershipUserRow> {
        self.membership_repo
            .find_row_for_participant(membership_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Membership {membership_id} not found")))
    }

    /// Lists memberships involving the requester, filtered and paged.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &MembershipListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MembershipUserRow>> {
        let rows = self.membership_repo.list(ctx.user_id, filter, page).await?;
        Ok(PageResponse::from_rows(rows, page))
    }
}
