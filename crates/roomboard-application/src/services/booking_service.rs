//! Booking application service
//!
//! Orchestrates the booking use cases: create, confirm, cancel, reschedule,
//! complete and availability checks. Stateless; all mutable state is
//! persisted via repositories.
//!
//! Every mutating use case runs its overlap re-check and its write inside a
//! serializable unit of work, and the store's exclusion constraint backs
//! that up: a write that raced past the check comes back as a concurrency
//! conflict, which `create_booking` retries a bounded number of times.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::dto::{BookingView, CreateBookingCommand, RescheduleBookingCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};

use roomboard_domain::booking::Booking;
use roomboard_domain::clock::Clock;
use roomboard_domain::repositories::{
    BookingRepository, IsolationLevel, RoomRepository, UnitOfWork,
};
use roomboard_domain::value_objects::{BookingId, RoomId, TimeRange, UserId};

/// How many times a store-level concurrency conflict is retried before it
/// is surfaced to the caller as a booking conflict
const MAX_CONFLICT_RETRIES: u32 = 3;

/// Booking application service
pub struct BookingService<BR, RR, U, C, E>
where
    BR: BookingRepository,
    RR: RoomRepository,
    U: UnitOfWork,
    C: Clock,
    E: EventPublisher,
{
    bookings: Arc<BR>,
    rooms: Arc<RR>,
    uow: Arc<U>,
    clock: Arc<C>,
    events: Arc<E>,
}

impl<BR, RR, U, C, E> BookingService<BR, RR, U, C, E>
where
    BR: BookingRepository,
    RR: RoomRepository,
    U: UnitOfWork,
    C: Clock,
    E: EventPublisher,
{
    /// Create a new BookingService with injected dependencies
    pub fn new(
        bookings: Arc<BR>,
        rooms: Arc<RR>,
        uow: Arc<U>,
        clock: Arc<C>,
        events: Arc<E>,
    ) -> Self {
        Self {
            bookings,
            rooms,
            uow,
            clock,
            events,
        }
    }

    /// Create a new pending booking for a room.
    pub async fn create_booking(
        &self,
        cmd: CreateBookingCommand,
    ) -> ApplicationResult<BookingView> {
        let room_id = RoomId::from_string(&cmd.room_id)
            .map_err(|_| ApplicationError::ValidationFailed("Invalid room ID".into()))?;
        let created_by = UserId::from_string(&cmd.created_by)
            .map_err(|_| ApplicationError::ValidationFailed("Invalid user ID".into()))?;
        let range = TimeRange::new(cmd.start, cmd.end)?;

        let mut attempt = 0;
        loop {
            let result = self
                .in_transaction(|| self.create_in_txn(room_id, created_by, range, cmd.subject.clone()))
                .await;
            match result {
                Ok(view) => {
                    self.events
                        .publish(ApplicationEvent::BookingCreated {
                            booking_id: view.id.clone(),
                            room_id: view.room_id.clone(),
                            timestamp: self.clock.now(),
                        })
                        .await;
                    return Ok(view);
                }
                Err(ApplicationError::ConcurrencyConflict(resource)) => {
                    attempt += 1;
                    if attempt > MAX_CONFLICT_RETRIES {
                        warn!(%room_id, "booking create retries exhausted");
                        return Err(ApplicationError::BookingConflict(format!(
                            "overlapping booking exists for room {}",
                            room_id
                        )));
                    }
                    debug!(%room_id, attempt, %resource, "retrying booking create");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Confirm a pending booking.
    pub async fn confirm_booking(&self, id: &str) -> ApplicationResult<BookingView> {
        let booking_id = Self::parse_booking_id(id)?;
        let view = self
            .in_transaction(|| self.confirm_in_txn(booking_id))
            .await?;
        self.events
            .publish(ApplicationEvent::BookingConfirmed {
                booking_id: view.id.clone(),
                timestamp: self.clock.now(),
            })
            .await;
        Ok(view)
    }

    /// Cancel a booking. Idempotent: cancelling an already-cancelled booking
    /// returns the unchanged projection.
    pub async fn cancel_booking(&self, id: &str) -> ApplicationResult<BookingView> {
        let booking_id = Self::parse_booking_id(id)?;
        let (view, changed) = self
            .in_transaction(|| self.cancel_in_txn(booking_id))
            .await?;
        if changed {
            self.events
                .publish(ApplicationEvent::BookingCancelled {
                    booking_id: view.id.clone(),
                    timestamp: self.clock.now(),
                })
                .await;
        }
        Ok(view)
    }

    /// Move a booking to a new window; it returns to pending and must be
    /// confirmed again.
    pub async fn reschedule_booking(
        &self,
        cmd: RescheduleBookingCommand,
    ) -> ApplicationResult<BookingView> {
        let booking_id = Self::parse_booking_id(&cmd.booking_id)?;
        let range = TimeRange::new(cmd.start, cmd.end)?;
        let view = self
            .in_transaction(|| self.reschedule_in_txn(booking_id, range))
            .await?;
        self.events
            .publish(ApplicationEvent::BookingRescheduled {
                booking_id: view.id.clone(),
                start: view.start,
                end: view.end,
                timestamp: self.clock.now(),
            })
            .await;
        Ok(view)
    }

    /// Mark a confirmed booking whose window has ended as completed.
    pub async fn complete_booking(&self, id: &str) -> ApplicationResult<BookingView> {
        let booking_id = Self::parse_booking_id(id)?;
        let view = self
            .in_transaction(|| self.complete_in_txn(booking_id))
            .await?;
        self.events
            .publish(ApplicationEvent::BookingCompleted {
                booking_id: view.id.clone(),
                timestamp: self.clock.now(),
            })
            .await;
        Ok(view)
    }

    /// Read-only availability projection.
    ///
    /// Returns `false` rather than an error for an unknown or inactive room.
    pub async fn check_availability(
        &self,
        room_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ApplicationResult<bool> {
        let room_id = RoomId::from_string(room_id)
            .map_err(|_| ApplicationError::ValidationFailed("Invalid room ID".into()))?;
        let range = TimeRange::new(start, end)?;

        let room = match self.rooms.find_by_id(&room_id).await? {
            Some(room) => room,
            None => return Ok(false),
        };
        let existing = self.bookings.list_overlapping(&room_id, &range).await?;
        Ok(room.is_available(&range, &existing))
    }

    /// Get booking by ID
    pub async fn get_booking(&self, id: &str) -> ApplicationResult<BookingView> {
        let booking_id = Self::parse_booking_id(id)?;
        let booking = self
            .bookings
            .find_by_id(&booking_id)
            .await?
            .ok_or_else(|| ApplicationError::BookingNotFound(id.to_string()))?;
        Ok(BookingView::from_domain(&booking))
    }

    /// List a room's bookings intersecting `[from, to)`, any status
    pub async fn list_room_bookings(
        &self,
        room_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApplicationResult<Vec<BookingView>> {
        let room_id = RoomId::from_string(room_id)
            .map_err(|_| ApplicationError::ValidationFailed("Invalid room ID".into()))?;
        if from >= to {
            return Err(ApplicationError::ValidationFailed(
                "Window end must be after window start".into(),
            ));
        }
        let bookings = self.bookings.list_by_room(&room_id, from, to).await?;
        Ok(bookings.iter().map(BookingView::from_domain).collect())
    }

    // === Transaction plumbing ===

    async fn in_transaction<T, F, Fut>(&self, work: F) -> ApplicationResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ApplicationResult<T>>,
    {
        self.uow
            .begin(IsolationLevel::Serializable)
            .await
            .map_err(|e| ApplicationError::TransactionFailed(e.to_string()))?;
        match work().await {
            Ok(value) => {
                self.uow
                    .save_changes()
                    .await
                    .map_err(|e| ApplicationError::TransactionFailed(e.to_string()))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.uow.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn create_in_txn(
        &self,
        room_id: RoomId,
        created_by: UserId,
        range: TimeRange,
        subject: Option<String>,
    ) -> ApplicationResult<BookingView> {
        let room = self
            .rooms
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| ApplicationError::RoomNotFound(room_id.to_string()))?;
        if !room.is_active() {
            return Err(ApplicationError::OperationNotAllowed(format!(
                "room {} is inactive",
                room_id
            )));
        }
        if self.bookings.has_overlap(&room_id, &range, None).await? {
            return Err(ApplicationError::BookingConflict(format!(
                "overlapping booking exists for room {}",
                room_id
            )));
        }

        let booking = Booking::create(room_id, created_by, range, subject, self.clock.now())?;
        self.bookings.add(&booking).await?;
        Ok(BookingView::from_domain(&booking))
    }

    async fn confirm_in_txn(&self, id: BookingId) -> ApplicationResult<BookingView> {
        let mut booking = self.load(&id).await?;
        let has_overlap = self
            .bookings
            .has_overlap(&booking.room_id(), &booking.time_range(), Some(&id))
            .await?;
        if has_overlap {
            return Err(ApplicationError::BookingConflict(format!(
                "overlapping booking exists for room {}",
                booking.room_id()
            )));
        }
        booking.confirm(self.clock.now())?;
        self.bookings.update(&booking).await?;
        Ok(BookingView::from_domain(&booking))
    }

    async fn cancel_in_txn(&self, id: BookingId) -> ApplicationResult<(BookingView, bool)> {
        let mut booking = self.load(&id).await?;
        if booking.is_cancelled() {
            return Ok((BookingView::from_domain(&booking), false));
        }
        booking.cancel(self.clock.now())?;
        self.bookings.update(&booking).await?;
        Ok((BookingView::from_domain(&booking), true))
    }

    async fn reschedule_in_txn(
        &self,
        id: BookingId,
        range: TimeRange,
    ) -> ApplicationResult<BookingView> {
        let mut booking = self.load(&id).await?;
        let has_overlap = self
            .bookings
            .has_overlap(&booking.room_id(), &range, Some(&id))
            .await?;
        if has_overlap {
            return Err(ApplicationError::BookingConflict(format!(
                "overlapping booking exists for room {}",
                booking.room_id()
            )));
        }
        booking.reschedule(range, self.clock.now())?;
        self.bookings.update(&booking).await?;
        Ok(BookingView::from_domain(&booking))
    }

    async fn complete_in_txn(&self, id: BookingId) -> ApplicationResult<BookingView> {
        let mut booking = self.load(&id).await?;
        booking.complete(self.clock.now())?;
        self.bookings.update(&booking).await?;
        Ok(BookingView::from_domain(&booking))
    }

    async fn load(&self, id: &BookingId) -> ApplicationResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::BookingNotFound(id.to_string()))
    }

    fn parse_booking_id(id: &str) -> ApplicationResult<BookingId> {
        BookingId::from_string(id)
            .map_err(|_| ApplicationError::ValidationFailed("Invalid booking ID".into()))
    }
}
