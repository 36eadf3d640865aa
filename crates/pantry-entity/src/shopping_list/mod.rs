//! Shopping list and its ordered items.

pub mod model;

pub use model::{NewShoppingListItem, ShoppingList, ShoppingListItem};
