//! Authenticated-profile lookups.

use std::sync::Arc;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::user::UserRepository;
use pantry_entity::user::User;

use crate::context::RequestContext;

/// Read-only access to the requester's own profile. This is the only
/// place a full `User` (including email) crosses the service boundary;
/// every payload about *other* users is trimmed to a `UserSummary`.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Fetches the requester's own profile.
    pub async fn get_self(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }
}
