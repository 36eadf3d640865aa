//! # pantry-entity
//!
//! Domain entity models for Pantry. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod membership;
pub mod resource;
pub mod share;
pub mod shopping_list;
pub mod user;
