//! Service-layer operations
//!
//! Each public operation takes the database connection and explicit actor
//! ids, runs inside a single request-scoped transaction where it writes
//! more than one row, and raises the shared `CoreError` taxonomy.

pub mod cart;
pub mod favorites;
pub mod follows;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;
