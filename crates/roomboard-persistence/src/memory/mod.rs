//! In-memory repository implementations
//!
//! Thread-safe in-memory implementations of the domain repository
//! interfaces. The booking store enforces the room/range exclusion
//! constraint at write time; the unit of work serializes conflicting
//! writers through a shared gate.

mod booking_repository;
mod room_repository;
mod unit_of_work;

pub use booking_repository::InMemoryBookingRepository;
pub use room_repository::InMemoryRoomRepository;
pub use unit_of_work::{write_gate, InMemoryUnitOfWork, WriteGate};
