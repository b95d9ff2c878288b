//! Error taxonomy shared by all operations
//!
//! Four business error kinds plus a database passthrough. The routing layer
//! owns status-code mapping (`Conflict`/`Validation` -> 400, `NotFound` ->
//! 404, `Authorization` -> 403), so every variant carries enough structured
//! detail for a precise client-facing message.

use thiserror::Error;

/// Errors raised by the core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or out-of-range input
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Referenced entity or relation does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness violation on add
    #[error("{0}")]
    Conflict(String),

    /// Actor lacks rights over the target entity
    #[error("{0}")]
    Authorization(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl CoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Map a unique-constraint violation to `Conflict`, leaving everything else
/// as a database error. Concurrent adds of the same relation race on the
/// storage-layer unique index; the loser must see `Conflict`, not `Database`.
pub(crate) fn map_unique_violation(err: sea_orm::DbErr, conflict: impl Into<String>) -> CoreError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => CoreError::Conflict(conflict.into()),
        _ => CoreError::Database(err),
    }
}
