//! Domain projections
//!
//! Read-side views assembled for serialization. Derived booleans such as
//! `is_favorited` are computed from an explicit viewer parameter, never
//! from ambient request context.

pub mod recipe;
pub mod user;

pub use recipe::{IngredientLine, RecipeView};
pub use user::UserProfile;
