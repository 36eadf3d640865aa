//! Resource share entity — the explicit per-resource grant record.

pub mod model;

pub use model::{ResourceShare, ShareListRow, ShareWithMembership};
