//! Share creation, listing, and revocation.
//!
//! Every precondition failure on create is `NotFound`: a membership that
//! does not exist, one that does not include the requester, one that is
//! not accepted, and a resource the requester does not own all look the
//! same from outside, so nothing about another user's data can be probed
//! through this surface. The single exception is the duplicate share,
//! which is `Conflict`.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_core::types::pagination::{PageRequest, PageResponse};
use pantry_database::repositories::membership::MembershipRepository;
use pantry_database::repositories::resource::ResourceRepository;
use pantry_database::repositories::share::{ShareListFilter, ShareRepository};
use pantry_entity::resource::ResourceKind;
use pantry_entity::share::{ResourceShare, ShareListRow};

use crate::context::RequestContext;

/// Manages explicit per-resource shares.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// Membership repository, for anchor validity checks.
    membership_repo: Arc<MembershipRepository>,
    /// Resource repository, for ownership checks.
    resource_repo: Arc<ResourceRepository>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        membership_repo: Arc<MembershipRepository>,
        resource_repo: Arc<ResourceRepository>,
    ) -> Self {
        Self {
            share_repo,
            membership_repo,
            resource_repo,
        }
    }

    /// Shares a resource the requester owns over one of their accepted
    /// memberships.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        resource_id: Uuid,
        membership_id: Uuid,
    ) -> AppResult<ResourceShare> {
        let membership = self
            .membership_repo
            .find_by_id(membership_id)
            .await?
            .filter(|m| m.involves(ctx.user_id) && m.is_accepted())
            .ok_or_else(|| AppError::not_found(format!("Membership {membership_id} not found")))?;

        self.resource_repo
            .find_owned_by(kind, resource_id, ctx.user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("{} {resource_id} not found", kind.label()))
            })?;

        let share = self
            .share_repo
            .create(kind, resource_id, membership.id)
            .await?;

        info!(
            share_id = %share.id,
            resource_kind = kind.label(),
            resource_id = %resource_id,
            membership_id = %membership.id,
            "Resource shared"
        );

        Ok(share)
    }

    /// Revokes a share. Either participant of the share's membership may
    /// revoke, not only the resource owner.
    pub async fn delete(&self, ctx: &RequestContext, share_id: Uuid) -> AppResult<()> {
        let share = self
            .share_repo
            .find_with_membership(share_id)
            .await?
            .filter(|s| s.involves(ctx.user_id))
            .ok_or_else(|| AppError::not_found(format!("Share {share_id} not found")))?;

        if !self.share_repo.delete(share.id).await? {
            return Err(AppError::not_found(format!("Share {share_id} not found")));
        }

        info!(share_id = %share.id, "Share revoked");
        Ok(())
    }

    /// Lists shares of one resource kind involving the requester.
    ///
    /// At least one side filter must be set; an unscoped listing across
    /// both sides of every membership is not a supported query.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        filter: &ShareListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareListRow>> {
        if !filter.targeting_self && !filter.from_self {
            return Err(AppError::validation(
                "Provide at least one of targeting_self or from_self",
            ));
        }

        let rows = self.share_repo.list(ctx.user_id, kind, filter, page).await?;
        Ok(PageResponse::from_rows(rows, page))
    }
}
