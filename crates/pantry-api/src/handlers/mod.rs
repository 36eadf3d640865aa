//! Route handlers organized by domain.

pub mod health;
pub mod membership;
pub mod share;
pub mod shopping_list;
pub mod user;
