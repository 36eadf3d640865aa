//! The grant-tier configuration table.
//!
//! Each `(resource kind, operation)` pair maps to one of two tiers:
//!
//! - **All** — visibility is a pure function of membership status: any
//!   accepted membership between requester and owner covers *every*
//!   resource of that kind the owner has, no share row required.
//! - **Selective** — visibility additionally requires an explicit share
//!   row on the specific resource, anchored to an accepted membership.
//!
//! The table is a closed configuration, not a policy engine: nothing at
//! runtime can add kinds or operations.

use pantry_entity::resource::ResourceKind;

/// The operation class being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOp {
    /// Viewing the resource and its children.
    Read,
    /// Mutating the resource or its children.
    Write,
}

/// How visibility of a resource is granted to a non-owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantTier {
    /// Any accepted membership with the owner suffices.
    All,
    /// An explicit share row on the resource is required.
    Selective,
}

/// The tier governing `op` on resources of kind `kind`.
///
/// Cookbooks and recipes are browsable by anyone in an accepted
/// membership with the owner; mutating them, and any access at all to
/// meal plans and shopping lists, requires an explicit share.
pub const fn tier_for(kind: ResourceKind, op: AccessOp) -> GrantTier {
    match (kind, op) {
        (ResourceKind::Cookbook | ResourceKind::Recipe, AccessOp::Read) => GrantTier::All,
        _ => GrantTier::Selective,
    }
}

/// The tier governing `op` on one concrete resource, accounting for its
/// `private` flag: a private cookbook or recipe opts out of ALL-tier
/// browsing and must be shared explicitly like everything else.
pub const fn effective_tier(kind: ResourceKind, op: AccessOp, private: bool) -> GrantTier {
    match tier_for(kind, op) {
        GrantTier::All if private => GrantTier::Selective,
        tier => tier,
    }
}
