//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use pantry_access::token::TokenDecoder;
use pantry_service::membership::MembershipService;
use pantry_service::share::ShareService;
use pantry_service::shopping_list::ShoppingListService;
use pantry_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// PostgreSQL connection pool, for the health probe.
    pub db_pool: PgPool,
    /// Bearer token decoder.
    pub token_decoder: Arc<TokenDecoder>,

    /// Membership service.
    pub membership_service: Arc<MembershipService>,
    /// Share service.
    pub share_service: Arc<ShareService>,
    /// Shopping list service.
    pub shopping_list_service: Arc<ShoppingListService>,
    /// User profile service.
    pub user_service: Arc<UserService>,
}
