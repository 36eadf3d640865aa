//! Route definitions for the Pantry HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Share
//! routes live under a `/api/share/{kind}` prefix so the dynamic kind
//! segment cannot shadow resource routes like `/api/shopping-list/{id}`.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(membership_routes())
        .merge(share_routes())
        .merge(shopping_list_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Kitchen membership invitations and approvals.
fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/kitchen/membership", post(handlers::membership::create))
        .route(
            "/kitchen/membership",
            put(handlers::membership::update_status),
        )
        .route("/kitchen/membership/list", get(handlers::membership::list))
        .route("/kitchen/membership/{id}", get(handlers::membership::get))
}

/// Explicit per-resource shares, kind-generic.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share/{kind}", post(handlers::share::create))
        .route("/share/{kind}/list", get(handlers::share::list))
        .route("/share/{kind}/{id}", delete(handlers::share::delete))
}

/// Shopping lists and their ordered items.
fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping-list/append-items",
            post(handlers::shopping_list::append_items),
        )
        .route("/shopping-list/{id}", get(handlers::shopping_list::get))
        .route(
            "/shopping-list/{id}/items/{item_id}",
            put(handlers::shopping_list::update_item),
        )
        .route(
            "/shopping-list/{id}/items/{item_id}",
            delete(handlers::shopping_list::delete_item),
        )
        .route(
            "/shopping-list/{id}/items/{item_id}/completed",
            put(handlers::shopping_list::set_item_completed),
        )
}

/// User self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/self", get(handlers::user::get_self))
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
