//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An account holder. Pantry only reads users; account management lives
/// in the identity layer that fronts this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Email address. Never serialized for anyone but the user themselves.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// The projection of a user that may be shown to *other* users.
///
/// Every payload that mentions a counterpart user (membership listings,
/// share listings) goes through this type, so an email address can never
/// leak across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
}
