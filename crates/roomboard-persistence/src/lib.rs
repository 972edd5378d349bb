//! Roomboard Persistence Layer
//!
//! Infrastructure layer providing repository implementations for the
//! scheduling domain. This crate implements the repository, unit-of-work
//! and exclusion-constraint contracts defined in `roomboard-domain`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Infrastructure Layer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  memory/                                                     │
//! │  ─────────                                                   │
//! │  InMemoryRoomRepository      (case-insensitive name index)   │
//! │  InMemoryBookingRepository   (room/range exclusion check)    │
//! │  InMemoryUnitOfWork          (serializable write gate)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                           │
//! │    RoomRepository, BookingRepository, UnitOfWork             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use roomboard_domain::repositories::BookingRepository;
//! use roomboard_persistence::memory::InMemoryBookingRepository;
//!
//! let repo: Arc<dyn BookingRepository> = Arc::new(InMemoryBookingRepository::new());
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;

pub use error::PersistenceError;

#[cfg(feature = "memory")]
pub use memory::{
    write_gate, InMemoryBookingRepository, InMemoryRoomRepository, InMemoryUnitOfWork,
    WriteGate,
};
