//! Shopping list use cases.

pub mod service;

pub use service::{ShoppingListService, ShoppingListWithItems};
