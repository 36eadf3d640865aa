//! Response DTOs.
//!
//! Counterpart users are always projected through `UserSummary` — id and
//! username only. The full profile (with email) is serialized exclusively
//! by the `users/self` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_entity::membership::{MembershipStatus, MembershipUserRow};
use pantry_entity::resource::ResourceKind;
use pantry_entity::share::{ResourceShare, ShareListRow};
use pantry_entity::user::{User, UserSummary};

/// A membership with both endpoints projected for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    /// Membership ID.
    pub id: Uuid,
    /// The inviting user.
    pub source_user: UserSummary,
    /// The invited user.
    pub destination_user: UserSummary,
    /// Approval status.
    pub status: MembershipStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

impl From<MembershipUserRow> for MembershipResponse {
    fn from(row: MembershipUserRow) -> Self {
        Self {
            id: row.id,
            source_user: UserSummary {
                id: row.source_user_id,
                username: row.source_username,
            },
            destination_user: UserSummary {
                id: row.destination_user_id,
                username: row.destination_username,
            },
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// A freshly created share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    /// Share ID.
    pub id: Uuid,
    /// Kind of the shared resource.
    pub resource_kind: ResourceKind,
    /// The shared resource.
    pub resource_id: Uuid,
    /// The membership the share is anchored to.
    pub membership_id: Uuid,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl From<ResourceShare> for ShareResponse {
    fn from(share: ResourceShare) -> Self {
        Self {
            id: share.id,
            resource_kind: share.resource_kind,
            resource_id: share.resource_id,
            membership_id: share.membership_id,
            created_at: share.created_at,
        }
    }
}

/// A share projected for listing, with the resource name and both
/// membership endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareListResponse {
    /// Share ID.
    pub id: Uuid,
    /// Kind of the shared resource.
    pub resource_kind: ResourceKind,
    /// The shared resource.
    pub resource_id: Uuid,
    /// Display name of the shared resource.
    pub resource_name: String,
    /// The membership the share is anchored to.
    pub membership_id: Uuid,
    /// The membership's inviting user.
    pub source_user: UserSummary,
    /// The membership's invited user.
    pub destination_user: UserSummary,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl From<ShareListRow> for ShareListResponse {
    fn from(row: ShareListRow) -> Self {
        Self {
            id: row.id,
            resource_kind: row.resource_kind,
            resource_id: row.resource_id,
            resource_name: row.resource_name,
            membership_id: row.membership_id,
            source_user: UserSummary {
                id: row.source_user_id,
                username: row.source_username,
            },
            destination_user: UserSummary {
                id: row.destination_user_id,
                username: row.destination_username,
            },
            created_at: row.created_at,
        }
    }
}

/// The requester's own profile. The only response type that carries an
/// email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<User> for SelfResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "ok" or "degraded".
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database probe result: "connected" or "unavailable".
    pub database: String,
}

/// Simple message response for deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}
