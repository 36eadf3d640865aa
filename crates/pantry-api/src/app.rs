//! Application builder — wires repositories, services, router, and
//! middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pantry_access::resolver::VisibilityResolver;
use pantry_access::token::TokenDecoder;
use pantry_core::config::AppConfig;
use pantry_core::error::AppError;
use pantry_database::repositories::membership::MembershipRepository;
use pantry_database::repositories::resource::ResourceRepository;
use pantry_database::repositories::share::ShareRepository;
use pantry_database::repositories::shopping_list::ShoppingListRepository;
use pantry_database::repositories::user::UserRepository;
use pantry_service::membership::MembershipService;
use pantry_service::share::ShareService;
use pantry_service::shopping_list::ShoppingListService;
use pantry_service::user::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Constructs the full dependency graph over an existing pool.
///
/// Shared between the server binary and the integration tests, so both
/// run exactly the same wiring.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let token_decoder = Arc::new(TokenDecoder::new(&config.auth));

    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let membership_repo = Arc::new(MembershipRepository::new(db_pool.clone()));
    let share_repo = Arc::new(ShareRepository::new(db_pool.clone()));
    let resource_repo = Arc::new(ResourceRepository::new(db_pool.clone()));
    let shopping_list_repo = Arc::new(ShoppingListRepository::new(db_pool.clone()));

    let resolver = Arc::new(VisibilityResolver::new(
        Arc::clone(&membership_repo),
        Arc::clone(&share_repo),
    ));

    let membership_service = Arc::new(MembershipService::new(
        Arc::clone(&membership_repo),
        Arc::clone(&user_repo),
    ));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&membership_repo),
        Arc::clone(&resource_repo),
    ));
    let shopping_list_service = Arc::new(ShoppingListService::new(
        Arc::clone(&shopping_list_repo),
        Arc::clone(&resolver),
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));

    AppState {
        db_pool,
        token_decoder,
        membership_service,
        share_service,
        shopping_list_service,
        user_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Runs the Pantry server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Pantry server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}
