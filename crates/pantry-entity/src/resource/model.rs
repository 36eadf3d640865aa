//! Owned resource projection.
//!
//! The richer domain around these rows (recipe content, plan scheduling)
//! lives in collaborating services; the share and visibility paths only
//! need ownership and a display name.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The kind-independent projection of an owned resource used by the
/// visibility and share paths: who owns it, and what to call it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnedResource {
    /// Resource identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
}
