//! Tastebook Core
//!
//! The persistence and business-rule core of a recipe-sharing platform.
//! Users author recipes built from tagged ingredients with quantities,
//! bookmark recipes, collect them into a shopping cart, and follow other
//! authors. The interesting logic lives in the recipe composer (atomic
//! assembly of a recipe with its ingredient and tag associations), the
//! favorite/cart togglers, and the shopping-list aggregator that sums
//! ingredient quantities across everything in a user's cart.
//!
//! HTTP routing, authentication, and image storage live in outer layers;
//! every operation here takes an explicit database connection and explicit
//! actor ids instead of ambient request context.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod operations;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use infrastructure::database::Database;
