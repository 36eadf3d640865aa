//! # pantry-api
//!
//! HTTP API layer for Pantry built on Axum.
//!
//! Provides the REST endpoints for kitchen memberships, resource shares,
//! and shopping lists, plus extractors, DTOs, middleware, and the
//! `AppError` → HTTP mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
