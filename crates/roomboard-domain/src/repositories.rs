//! Repository interfaces for data persistence
//!
//! These interfaces define the contracts the scheduling engine needs from a
//! durable store. Implementations are provided by infrastructure crates; the
//! domain layer defines only traits.
//!
//! The overlap check a use-case runs and the write that follows it must act
//! as one atomic unit per room. Stores satisfy that either through the
//! [`UnitOfWork`] serializing conflicting writers, or by rejecting an
//! overlapping insert at write time with `ConcurrencyConflict` (an exclusion
//! constraint over room and range), or both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::booking::Booking;
use crate::errors::DomainResult;
use crate::room::Room;
use crate::value_objects::{BookingId, RoomId, TimeRange};

/// Repository for room entities
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: &RoomId) -> DomainResult<Option<Room>>;

    /// Find room by name (case-insensitive)
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Room>>;

    /// Check whether a room with this name exists (case-insensitive)
    async fn exists_by_name(&self, name: &str) -> DomainResult<bool>;

    /// List all active rooms
    async fn list_active(&self) -> DomainResult<Vec<Room>>;

    /// Insert a new room
    async fn add(&self, room: &Room) -> DomainResult<()>;

    /// Update an existing room
    async fn update(&self, room: &Room) -> DomainResult<()>;
}

/// Repository for booking aggregates
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: &BookingId) -> DomainResult<Option<Booking>>;

    /// List non-cancelled bookings of the room whose windows overlap `range`
    async fn list_overlapping(
        &self,
        room_id: &RoomId,
        range: &TimeRange,
    ) -> DomainResult<Vec<Booking>>;

    /// Whether any non-cancelled booking of the room overlaps `range`,
    /// optionally ignoring one booking (the caller's own)
    async fn has_overlap(
        &self,
        room_id: &RoomId,
        range: &TimeRange,
        exclude: Option<&BookingId>,
    ) -> DomainResult<bool>;

    /// Insert a new booking.
    ///
    /// Stores enforce the room/range exclusion constraint here: inserting a
    /// non-cancelled booking that overlaps an existing non-cancelled one for
    /// the same room fails with `ConcurrencyConflict`, even when an
    /// application-level check raced past it.
    async fn add(&self, booking: &Booking) -> DomainResult<()>;

    /// Update an existing booking, under the same exclusion constraint
    async fn update(&self, booking: &Booking) -> DomainResult<()>;

    /// List bookings of any status whose windows intersect `[from, to)`
    async fn list_by_room(
        &self,
        room_id: &RoomId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;
}

/// Transaction isolation requested from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadCommitted,
    RepeatableRead,
    /// Conflicting writers serialize; required around check-and-write
    Serializable,
}

/// Unit of work: the transactional boundary grouping the reads and writes of
/// one use-case execution
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a transaction at the given isolation level
    async fn begin(&self, isolation: IsolationLevel) -> DomainResult<()>;

    /// Commit the open transaction
    async fn save_changes(&self) -> DomainResult<()>;

    /// Abandon the open transaction
    async fn rollback(&self) -> DomainResult<()>;
}
