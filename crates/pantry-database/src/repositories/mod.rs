//! Repository implementations for all Pantry entities.

pub mod membership;
pub mod resource;
pub mod share;
pub mod shopping_list;
pub mod user;

pub use membership::MembershipRepository;
pub use resource::ResourceRepository;
pub use share::ShareRepository;
pub use shopping_list::ShoppingListRepository;
pub use user::UserRepository;
