//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("invalid category reference")]
    InvalidReference { id: Uuid },

    #[error("{0}")]
    Duplicate(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
