//! Kitchen membership entity — the directed, approval-gated edge between
//! two users that all sharing hangs off.

pub mod model;
pub mod status;

pub use model::{KitchenMembership, MembershipUserRow};
pub use status::MembershipStatus;
