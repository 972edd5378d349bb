//! Roomboard Application Layer
//!
//! Implements the booking use cases by orchestrating domain aggregates
//! through the repository abstractions. Services are stateless, manage the
//! transaction boundary around each use case, and emit application events
//! after commit.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       Application Layer                           │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Services        │ DTOs                 │ Ports          │ Events │
//! │  ─────────       │ ────                 │ ─────          │ ────── │
//! │  BookingService  │ CreateBookingCommand │ UnitOfWork     │ AppEvt │
//! │  RoomService     │ BookingView          │ EventPublisher │        │
//! │                  │ RoomView             │                │        │
//! └──────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                              │
//! │   Booking, Room, TimeRange, Repository Traits, Clock              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Responsibilities
//!
//! - **Use Case Orchestration**: validate input, load, re-check, mutate,
//!   persist
//! - **Transaction Boundaries**: wrap each check-and-write in a
//!   serializable unit of work and retry store-level conflicts
//! - **DTO Mapping**: convert domain objects to presentation-safe views
//! - **Error Mapping**: translate domain errors to application errors
//!
//! # Non-Goals
//!
//! - Domain logic (belongs in the domain layer)
//! - Storage internals (belong in the infrastructure layer)
//! - HTTP/identity handling (belongs in the presentation layer)

pub mod dto;
pub mod errors;
pub mod events;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use events::{ApplicationEvent, EventPublisher};
pub use ports::UnitOfWork;
pub use services::{BookingService, RoomService};
