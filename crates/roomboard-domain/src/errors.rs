//! Domain errors for Roomboard

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid time range: {reason}")]
    InvalidTimeRange { reason: String },

    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Invalid booking transition: {event} is not allowed from {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Booking conflict: overlapping booking exists for room {room_id}")]
    BookingConflict { room_id: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Concurrency conflict: {resource}")]
    ConcurrencyConflict { resource: String },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
