//! The closed enumeration of shareable resource kinds.

use serde::{Deserialize, Serialize};

/// Kind of resource a share can apply to.
///
/// This enum is deliberately closed: the grant-tier table and the share
/// store are written against exactly these four kinds, and nothing in
/// the system is user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A cookbook (a named collection of recipes).
    Cookbook,
    /// A recipe.
    Recipe,
    /// A meal plan.
    MealPlan,
    /// A shopping list.
    ShoppingList,
}

impl ResourceKind {
    /// All kinds, in display order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Cookbook,
        ResourceKind::Recipe,
        ResourceKind::MealPlan,
        ResourceKind::ShoppingList,
    ];

    /// Parse from the kebab-case path segment used in share routes.
    pub fn from_path_segment(s: &str) -> Option<Self> {
        match s {
            "cookbook" => Some(Self::Cookbook),
            "recipe" => Some(Self::Recipe),
            "meal-plan" => Some(Self::MealPlan),
            "shopping-list" => Some(Self::ShoppingList),
            _ => None,
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cookbook => "Cookbook",
            Self::Recipe => "Recipe",
            Self::MealPlan => "Meal plan",
            Self::ShoppingList => "Shopping list",
        }
    }
}
