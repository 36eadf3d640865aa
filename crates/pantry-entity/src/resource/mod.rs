//! Shareable owned resources: cookbooks, recipes, meal plans, and
//! shopping lists.

pub mod kind;
pub mod model;

pub use kind::ResourceKind;
pub use model::OwnedResource;
