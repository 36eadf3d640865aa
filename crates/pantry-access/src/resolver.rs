//! The visibility resolver.
//!
//! Given a requester, a resource's owner, the resource kind, and the
//! operation, decides whether the requester may proceed and which
//! membership (if any) authorized it. Every read and write path over
//! owned data funnels through here.
//!
//! The membership pair is always queried unordered: once accepted, a
//! membership grants symmetric visibility regardless of who invited whom.

use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use pantry_core::result::AppResult;
use pantry_database::repositories::membership::MembershipRepository;
use pantry_database::repositories::share::ShareRepository;
use pantry_entity::resource::ResourceKind;

use crate::tier::{AccessOp, GrantTier, tier_for};

/// The outcome of a visibility resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Whether the requester may proceed.
    pub visible: bool,
    /// The membership that authorized access, for display attribution.
    /// `None` when the requester is the owner, and always `None` when
    /// `visible` is false. Never consulted for the visibility decision
    /// itself.
    pub granting_membership_id: Option<Uuid>,
}

impl Visibility {
    /// The owner looking at their own resource.
    pub fn owner() -> Self {
        Self {
            visible: true,
            granting_membership_id: None,
        }
    }

    /// Access granted through a membership.
    pub fn granted_via(membership_id: Uuid) -> Self {
        Self {
            visible: true,
            granting_membership_id: Some(membership_id),
        }
    }

    /// No access. Callers surface this as `NotFound`, never as a
    /// distinct forbidden error, so unauthorized users cannot probe for
    /// resource existence.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            granting_membership_id: None,
        }
    }
}

/// Resolves resource visibility from membership state and share rows.
#[derive(Debug, Clone)]
pub struct VisibilityResolver {
    /// Membership store.
    membership_repo: Arc<MembershipRepository>,
    /// Share (grant) store.
    share_repo: Arc<ShareRepository>,
}

impl VisibilityResolver {
    /// Creates a new resolver.
    pub fn new(
        membership_repo: Arc<MembershipRepository>,
        share_repo: Arc<ShareRepository>,
    ) -> Self {
        Self {
            membership_repo,
            share_repo,
        }
    }

    /// Decide whether `requester` may perform `op` on the resource
    /// `(kind, resource_id)` owned by `owner`.
    ///
    /// Owners always pass. Otherwise the tier table picks the check:
    /// ALL-tier needs any accepted membership on the unordered pair,
    /// SELECTIVE-tier needs a share row on the resource whose membership
    /// is accepted and joins the pair. Both checks hit live membership
    /// status, so denying a membership revokes access immediately with
    /// no cascading cleanup.
    pub async fn resolve(
        &self,
        requester: Uuid,
        owner: Uuid,
        kind: ResourceKind,
        resource_id: Uuid,
        op: AccessOp,
    ) -> AppResult<Visibility> {
        self.resolve_with_tier(requester, owner, kind, resource_id, tier_for(kind, op))
            .await
    }

    /// Like [`resolve`](Self::resolve), but with the tier supplied by the
    /// caller. Callers holding a resource with a `private` flag compute it
    /// via [`effective_tier`](crate::tier::effective_tier).
    pub async fn resolve_with_tier(
        &self,
        requester: Uuid,
        owner: Uuid,
        kind: ResourceKind,
        resource_id: Uuid,
        tier: GrantTier,
    ) -> AppResult<Visibility> {
        if requester == owner {
            return Ok(Visibility::owner());
        }

        let granting = match tier {
            GrantTier::All => {
                self.membership_repo
                    .find_accepted_between(requester, owner)
                    .await?
            }
            GrantTier::Selective => {
                self.share_repo
                    .find_granting_membership(kind, resource_id, requester, owner)
                    .await?
            }
        };

        Ok(match granting {
            Some(membership_id) => Visibility::granted_via(membership_id),
            None => Visibility::hidden(),
        })
    }

    /// [`resolve`](Self::resolve) on an open transaction. Mutations must
    /// use this variant so the resolution commits atomically with the
    /// write it gates; a deny or revoke landing in between rolls the
    /// write back instead of being honored after the fact.
    pub async fn resolve_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requester: Uuid,
        owner: Uuid,
        kind: ResourceKind,
        resource_id: Uuid,
        op: AccessOp,
    ) -> AppResult<Visibility> {
        self.resolve_with_tier_in(tx, requester, owner, kind, resource_id, tier_for(kind, op))
            .await
    }

    /// [`resolve_with_tier`](Self::resolve_with_tier) on an open
    /// transaction.
    pub async fn resolve_with_tier_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requester: Uuid,
        owner: Uuid,
        kind: ResourceKind,
        resource_id: Uuid,
        tier: GrantTier,
    ) -> AppResult<Visibility> {
        if requester == owner {
            return Ok(Visibility::owner());
        }

        let granting = match tier {
            GrantTier::All => {
                self.membership_repo
                    .find_accepted_between_in(tx, requester, owner)
                    .await?
            }
            GrantTier::Selective => {
                self.share_repo
                    .find_granting_membership_in(tx, kind, resource_id, requester, owner)
                    .await?
            }
        };

        Ok(match granting {
            Some(membership_id) => Visibility::granted_via(membership_id),
            None => Visibility::hidden(),
        })
    }
}
