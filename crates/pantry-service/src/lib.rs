//! # pantry-service
//!
//! Business logic service layer for Pantry. Each service orchestrates
//! repositories and the visibility resolver to implement application-level
//! use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod membership;
pub mod share;
pub mod shopping_list;
pub mod user;

pub use context::RequestContext;
pub use membership::MembershipService;
pub use share::ShareService;
pub use shopping_list::ShoppingListService;
pub use user::UserService;
