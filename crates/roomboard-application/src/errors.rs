//! Application layer error types
//!
//! These errors represent application-level failures that are suitable
//! for API/UI consumption. They wrap domain errors with additional context.

use thiserror::Error;

use roomboard_domain::errors::DomainError;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
///
/// These errors provide context suitable for external consumers (API, UI)
/// while hiding internal domain implementation details.
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    // === Validation Errors ===

    /// Input validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // === Not Found Errors ===

    /// Room not found
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Booking not found
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    // === Conflict Errors ===

    /// Room with this name already exists
    #[error("Room already exists with name: {0}")]
    RoomAlreadyExists(String),

    /// An overlapping booking blocks the requested window
    #[error("Booking conflict: {0}")]
    BookingConflict(String),

    /// Operation not allowed in current state
    #[error("Operation not allowed: {0}")]
    OperationNotAllowed(String),

    /// Transaction-level write conflict under race
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    // === Infrastructure Errors ===

    /// Repository operation failed
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Transaction failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    // === Domain Error Wrapper ===

    /// Wrapped domain error
    #[error("Domain error: {0}")]
    DomainError(String),
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidTimeRange { reason } => {
                ApplicationError::ValidationFailed(format!("Invalid time range: {}", reason))
            }
            DomainError::ValidationError { field, reason } => {
                ApplicationError::ValidationFailed(format!("{}: {}", field, reason))
            }
            DomainError::InvalidTransition { from, event } => ApplicationError::OperationNotAllowed(
                format!("{} is not allowed from {}", event, from),
            ),
            DomainError::BookingConflict { room_id } => {
                ApplicationError::BookingConflict(format!(
                    "overlapping booking exists for room {}",
                    room_id
                ))
            }
            DomainError::EntityNotFound { entity_type, id } => match entity_type.as_str() {
                "Room" => ApplicationError::RoomNotFound(id),
                "Booking" => ApplicationError::BookingNotFound(id),
                _ => ApplicationError::DomainError(format!("{} not found: {}", entity_type, id)),
            },
            DomainError::ConcurrencyConflict { resource } => {
                ApplicationError::ConcurrencyConflict(resource)
            }
        }
    }
}
