//! Resource share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::kind::ResourceKind;

/// An explicit share of one resource over one membership.
///
/// A share row carries no status of its own: it is live exactly while its
/// membership is `accepted`, and dead the instant the membership is denied.
/// That rule is enforced at query time, never by cascading updates, so a
/// re-accepted membership revives its shares.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResourceShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// Kind of the shared resource.
    pub resource_kind: ResourceKind,
    /// The shared resource.
    pub resource_id: Uuid,
    /// The membership this share is anchored to.
    pub membership_id: Uuid,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

/// A share joined with its membership's endpoints, as needed for the
/// "either participant may revoke" check.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareWithMembership {
    /// Unique share identifier.
    pub id: Uuid,
    /// Kind of the shared resource.
    pub resource_kind: ResourceKind,
    /// The shared resource.
    pub resource_id: Uuid,
    /// The membership this share is anchored to.
    pub membership_id: Uuid,
    /// The membership's inviting user.
    pub source_user_id: Uuid,
    /// The membership's invited user.
    pub destination_user_id: Uuid,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl ShareWithMembership {
    /// Whether `user_id` is a participant of the share's membership.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.source_user_id == user_id || self.destination_user_id == user_id
    }
}

/// A share row projected for list display: includes the resource's name
/// and the counterpart usernames.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareListRow {
    /// Unique share identifier.
    pub id: Uuid,
    /// Kind of the shared resource.
    pub resource_kind: ResourceKind,
    /// The shared resource.
    pub resource_id: Uuid,
    /// Display name of the shared resource.
    pub resource_name: String,
    /// The membership this share is anchored to.
    pub membership_id: Uuid,
    /// The membership's inviting user.
    pub source_user_id: Uuid,
    /// The inviting user's username.
    pub source_username: String,
    /// The membership's invited user.
    pub destination_user_id: Uuid,
    /// The invited user's username.
    pub destination_username: String,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}
