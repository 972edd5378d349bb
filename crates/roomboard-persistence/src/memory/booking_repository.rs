//! In-memory booking repository implementation
//!
//! Besides the plain queries, this store enforces the room/range exclusion
//! constraint: a write that would leave two non-cancelled bookings of the
//! same room with overlapping windows is rejected with a concurrency
//! conflict, no matter what the caller checked beforehand.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::warn;

use roomboard_domain::{
    booking::Booking,
    errors::DomainResult,
    repositories::BookingRepository,
    value_objects::{BookingId, RoomId, TimeRange},
};

use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of BookingRepository
///
/// Uses RwLock for concurrent read access with exclusive write access; the
/// exclusion check runs under the write lock, so overlapping writers cannot
/// interleave between check and insert.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingRepository {
    /// Create a new empty in-memory booking repository
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(HashMap::new()),
        }
    }

    /// Create with initial bookings (useful for testing)
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        let map: HashMap<BookingId, Booking> =
            bookings.into_iter().map(|b| (b.id(), b)).collect();
        Self {
            bookings: RwLock::new(map),
        }
    }

    /// Get the current count of bookings (for testing)
    pub fn count(&self) -> usize {
        self.bookings.read().len()
    }

    fn exclusion_violation(
        bookings: &HashMap<BookingId, Booking>,
        candidate: &Booking,
    ) -> Option<BookingId> {
        if candidate.is_cancelled() {
            return None;
        }
        bookings
            .values()
            .find(|b| b.id() != candidate.id() && b.conflicts_with(candidate))
            .map(|b| b.id())
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_id(&self, id: &BookingId) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read();
        Ok(bookings.get(id).cloned())
    }

    async fn list_overlapping(
        &self,
        room_id: &RoomId,
        range: &TimeRange,
    ) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read();
        let mut overlapping: Vec<Booking> = bookings
            .values()
            .filter(|b| b.room_id() == *room_id && !b.is_cancelled() && b.overlaps(range))
            .cloned()
            .collect();
        overlapping.sort_by_key(|b| b.time_range().start());
        Ok(overlapping)
    }

    async fn has_overlap(
        &self,
        room_id: &RoomId,
        range: &TimeRange,
        exclude: Option<&BookingId>,
    ) -> DomainResult<bool> {
        let bookings = self.bookings.read();
        Ok(bookings.values().any(|b| {
            b.room_id() == *room_id
                && Some(&b.id()) != exclude
                && !b.is_cancelled()
                && b.overlaps(range)
        }))
    }

    async fn add(&self, booking: &Booking) -> DomainResult<()> {
        let mut bookings = self.bookings.write();
        if bookings.contains_key(&booking.id()) {
            return Err(PersistenceError::concurrency_conflict(format!(
                "booking {} already exists",
                booking.id()
            ))
            .into());
        }
        if let Some(existing) = Self::exclusion_violation(&bookings, booking) {
            warn!(
                room_id = %booking.room_id(),
                existing = %existing,
                "rejecting overlapping booking insert"
            );
            return Err(PersistenceError::concurrency_conflict(format!(
                "overlapping booking for room {}",
                booking.room_id()
            ))
            .into());
        }
        bookings.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> DomainResult<()> {
        let mut bookings = self.bookings.write();
        if !bookings.contains_key(&booking.id()) {
            return Err(
                PersistenceError::not_found("Booking", booking.id().to_string()).into(),
            );
        }
        if let Some(existing) = Self::exclusion_violation(&bookings, booking) {
            warn!(
                room_id = %booking.room_id(),
                existing = %existing,
                "rejecting overlapping booking update"
            );
            return Err(PersistenceError::concurrency_conflict(format!(
                "overlapping booking for room {}",
                booking.room_id()
            ))
            .into());
        }
        bookings.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn list_by_room(
        &self,
        room_id: &RoomId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read();
        let mut in_window: Vec<Booking> = bookings
            .values()
            .filter(|b| {
                b.room_id() == *room_id
                    && b.time_range().start() < to
                    && from < b.time_range().end()
            })
            .cloned()
            .collect();
        in_window.sort_by_key(|b| b.time_range().start());
        Ok(in_window)
    }
}
