//! Membership approval status state machine.

use serde::{Deserialize, Serialize};

/// Approval status of a kitchen membership.
///
/// The lifecycle: a membership is born `pending`, and the destination user
/// moves it to `accepted` or `denied`. Once out of `pending` it may flip
/// between `accepted` and `denied` at any time, but nothing ever returns
/// to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Invitation sent, awaiting a decision from the destination user.
    Pending,
    /// Destination user accepted; shares on this membership are live.
    Accepted,
    /// Destination user denied; shares on this membership are dead.
    Denied,
}

impl MembershipStatus {
    /// Whether a transition to `next` is legal, regardless of who asks.
    ///
    /// `pending` is an origin state only: `pending -> accepted`,
    /// `pending -> denied`, and `accepted <-> denied` are legal; any
    /// transition *to* `pending` is not.
    pub fn can_transition_to(self, next: MembershipStatus) -> bool {
        match next {
            MembershipStatus::Pending => false,
            MembershipStatus::Accepted | MembershipStatus::Denied => true,
        }
    }

    /// All statuses, for default list filters.
    pub const ALL: [MembershipStatus; 3] = [
        MembershipStatus::Pending,
        MembershipStatus::Accepted,
        MembershipStatus::Denied,
    ];

    /// Parse from the wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "denied" => Some(Self::Denied),
            _ => None,
        }
    }

    /// The wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Denied => "denied",
        }
    }
}
