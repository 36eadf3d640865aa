//! Kitchen membership entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MembershipStatus;

/// A directed membership edge between two users.
///
/// `source_user_id` is the inviter and `destination_user_id` the invitee.
/// Direction is storage-only: once `accepted`, visibility is symmetric and
/// every permission check treats the pair as unordered. The direction is
/// kept for display ("who invited whom") and for the `targeting_self` /
/// `from_self` list filters.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KitchenMembership {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The inviting user.
    pub source_user_id: Uuid,
    /// The invited user; the only one who may change `status`.
    pub destination_user_id: Uuid,
    /// Approval status.
    pub status: MembershipStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

impl KitchenMembership {
    /// Whether `user_id` is either endpoint of this edge.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.source_user_id == user_id || self.destination_user_id == user_id
    }

    /// Whether shares anchored to this membership are currently live.
    pub fn is_accepted(&self) -> bool {
        self.status == MembershipStatus::Accepted
    }
}

/// A membership row joined with both participants' usernames, as fetched
/// by list and get queries for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipUserRow {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The inviting user.
    pub source_user_id: Uuid,
    /// The inviting user's username.
    pub source_username: String,
    /// The invited user.
    pub destination_user_id: Uuid,
    /// The invited user's username.
    pub destination_username: String,
    /// Approval status.
    pub status: MembershipStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}
