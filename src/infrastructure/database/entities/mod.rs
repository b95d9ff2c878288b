//! SeaORM entity definitions
//!
//! These map the domain records to database tables. Ingredients and tags are
//! shared reference data; recipes own their ingredient/tag junction rows;
//! favorites, shopping-list entries, and follows are per-user join records.

pub mod favorite;
pub mod follow;
pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_tag;
pub mod shopping_list_entry;
pub mod tag;
pub mod user;

// Re-export all entities
pub use favorite::Entity as Favorite;
pub use follow::Entity as Follow;
pub use ingredient::Entity as Ingredient;
pub use recipe::Entity as Recipe;
pub use recipe_ingredient::Entity as RecipeIngredient;
pub use recipe_tag::Entity as RecipeTag;
pub use shopping_list_entry::Entity as ShoppingListEntry;
pub use tag::Entity as Tag;
pub use user::Entity as User;

// Re-export active models for easy access
pub use favorite::ActiveModel as FavoriteActive;
pub use follow::ActiveModel as FollowActive;
pub use ingredient::ActiveModel as IngredientActive;
pub use recipe::ActiveModel as RecipeActive;
pub use recipe_ingredient::ActiveModel as RecipeIngredientActive;
pub use recipe_tag::ActiveModel as RecipeTagActive;
pub use shopping_list_entry::ActiveModel as ShoppingListEntryActive;
pub use tag::ActiveModel as TagActive;
pub use user::ActiveModel as UserActive;
