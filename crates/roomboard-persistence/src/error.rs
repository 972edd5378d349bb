//! Persistence layer error types
//!
//! Error mapping to domain types

use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Write rejected because it would violate a store constraint under race
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    /// Transaction protocol misuse (begin without commit, commit without begin)
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl PersistenceError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a concurrency conflict error
    pub fn concurrency_conflict(message: impl Into<String>) -> Self {
        Self::ConcurrencyConflict(message.into())
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for roomboard_domain::errors::DomainError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity_type, id } => {
                roomboard_domain::errors::DomainError::EntityNotFound {
                    entity_type: entity_type.to_string(),
                    id,
                }
            }
            PersistenceError::ConcurrencyConflict(msg) => {
                roomboard_domain::errors::DomainError::ConcurrencyConflict { resource: msg }
            }
            PersistenceError::Transaction(msg) => {
                roomboard_domain::errors::DomainError::ConcurrencyConflict {
                    resource: format!("transaction: {}", msg),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = PersistenceError::not_found("Room", "room-123");
        assert!(err.to_string().contains("Room"));
        assert!(err.to_string().contains("room-123"));
    }

    #[test]
    fn test_error_conversion() {
        let err = PersistenceError::not_found("Room", "123");
        let domain_err: roomboard_domain::errors::DomainError = err.into();
        assert!(matches!(
            domain_err,
            roomboard_domain::errors::DomainError::EntityNotFound { .. }
        ));
    }

    #[test]
    fn test_conflict_conversion() {
        let err = PersistenceError::concurrency_conflict("overlapping insert");
        let domain_err: roomboard_domain::errors::DomainError = err.into();
        assert!(matches!(
            domain_err,
            roomboard_domain::errors::DomainError::ConcurrencyConflict { .. }
        ));
    }
}
