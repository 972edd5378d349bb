//! Roomboard Domain Layer
//!
//! The scheduling core: time-interval math, the booking lifecycle state
//! machine, room availability, and the repository contracts a durable store
//! has to satisfy. No infrastructure dependencies; everything here is
//! synchronous, in-memory and deterministic given its inputs.
//!
//! The central invariant: no two non-cancelled bookings of the same room may
//! have overlapping time ranges. Intervals that merely touch at a boundary
//! do not overlap, so back-to-back bookings are legal.

pub mod booking;
pub mod clock;
pub mod errors;
pub mod repositories;
pub mod room;
pub mod value_objects;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{DomainError, DomainResult};
pub use repositories::{BookingRepository, IsolationLevel, RoomRepository, UnitOfWork};
pub use room::Room;
pub use value_objects::{BookingId, RoomId, TimeRange, UserId};
