//! # pantry-access
//!
//! The access-control core of Pantry: the grant-tier configuration table,
//! the visibility resolver every read and write path consults before
//! touching owned data, and bearer-token verification for establishing
//! the requester.

pub mod resolver;
pub mod tier;
pub mod token;

pub use resolver::{Visibility, VisibilityResolver};
pub use tier::{AccessOp, GrantTier, effective_tier, tier_for};
