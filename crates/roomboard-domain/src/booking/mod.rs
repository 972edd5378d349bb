//! Booking Aggregate Root
//!
//! Owns the reservation lifecycle: a booking ties a room, a requester and a
//! time range together and enforces its own transition rules. The overlap
//! guard against other bookings of the same room needs store data, so the
//! use-case layer verifies it on freshly loaded bookings before invoking a
//! transition here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{BookingId, RoomId, TimeRange, UserId};

/// Maximum length of a booking subject line
const MAX_SUBJECT_LEN: usize = 200;

/// Booking Aggregate Root
///
/// Construction goes through [`Booking::create`]; state changes go through
/// the transition methods, which stamp `status_changed_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Immutable identity
    id: BookingId,

    /// Room the booking reserves (immutable, referenced by id only)
    room_id: RoomId,

    /// Requester identity, opaque to the scheduling core (immutable)
    created_by: UserId,

    /// Optional subject line, at most 200 characters
    subject: Option<String>,

    /// Reserved window
    time_range: TimeRange,

    /// Lifecycle status
    status: BookingStatus,

    /// Creation timestamp (immutable)
    created_at: DateTime<Utc>,

    /// Set on every status transition
    status_changed_at: Option<DateTime<Utc>>,
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Booking {
    /// Create a new booking in `Pending` state.
    ///
    /// # Invariants
    /// - Subject, when present, is at most 200 characters
    /// - The reserved window must end strictly after `now`
    ///
    /// # Errors
    /// Returns `ValidationError` when an invariant is violated.
    pub fn create(
        room_id: RoomId,
        created_by: UserId,
        time_range: TimeRange,
        subject: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::validate_subject(subject.as_deref())?;
        Self::validate_in_future(&time_range, now)?;

        Ok(Self {
            id: BookingId::new(),
            room_id,
            created_by,
            subject,
            time_range,
            status: BookingStatus::Pending,
            created_at: now,
            status_changed_at: None,
        })
    }

    /// Confirm a pending booking.
    ///
    /// Callers verify against the store that no other non-cancelled booking
    /// of the room overlaps this one before confirming.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(self.invalid_transition("confirm"));
        }
        self.transition(BookingStatus::Confirmed, now);
        Ok(())
    }

    /// Cancel the booking.
    ///
    /// Idempotent: cancelling an already-cancelled booking is a no-op.
    /// Completed bookings cannot be cancelled.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            BookingStatus::Cancelled => Ok(()),
            BookingStatus::Pending | BookingStatus::Confirmed => {
                self.transition(BookingStatus::Cancelled, now);
                Ok(())
            }
            BookingStatus::Completed => Err(self.invalid_transition("cancel")),
        }
    }

    /// Move the booking to a new window, returning it to `Pending`.
    ///
    /// A confirmed booking that moves must be reconfirmed. Callers re-verify
    /// the overlap guard for the new window, excluding this booking itself.
    ///
    /// # Errors
    /// - `InvalidTransition` unless the booking is `Pending` or `Confirmed`
    /// - `ValidationError` when `new_range` ends at or before `now`
    pub fn reschedule(&mut self, new_range: TimeRange, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            BookingStatus::Pending | BookingStatus::Confirmed => {}
            _ => return Err(self.invalid_transition("reschedule")),
        }
        Self::validate_in_future(&new_range, now)?;

        self.time_range = new_range;
        self.transition(BookingStatus::Pending, now);
        Ok(())
    }

    /// Mark a confirmed booking as completed.
    ///
    /// # Errors
    /// - `InvalidTransition` unless the booking is `Confirmed`
    /// - `InvalidTransition` when the reserved window has not ended yet
    pub fn complete(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != BookingStatus::Confirmed {
            return Err(self.invalid_transition("complete"));
        }
        if now < self.time_range.end() {
            return Err(self.invalid_transition("complete before end"));
        }
        self.transition(BookingStatus::Completed, now);
        Ok(())
    }

    /// True when this booking's window overlaps `range`
    pub fn overlaps(&self, range: &TimeRange) -> bool {
        self.time_range.overlaps(range)
    }

    /// True when both bookings reserve the same room, neither is cancelled,
    /// and their windows overlap
    pub fn conflicts_with(&self, other: &Booking) -> bool {
        self.room_id == other.room_id
            && !self.is_cancelled()
            && !other.is_cancelled()
            && self.overlaps(&other.time_range)
    }

    // === Getters ===

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status_changed_at(&self) -> Option<DateTime<Utc>> {
        self.status_changed_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    pub fn is_completed(&self) -> bool {
        self.status == BookingStatus::Completed
    }

    // === Internals ===

    fn transition(&mut self, to: BookingStatus, now: DateTime<Utc>) {
        self.status = to;
        self.status_changed_at = Some(now);
    }

    fn invalid_transition(&self, event: &str) -> DomainError {
        DomainError::InvalidTransition {
            from: self.status.to_string(),
            event: event.to_string(),
        }
    }

    fn validate_subject(subject: Option<&str>) -> DomainResult<()> {
        if let Some(subject) = subject {
            if subject.chars().count() > MAX_SUBJECT_LEN {
                return Err(DomainError::ValidationError {
                    field: "subject".into(),
                    reason: "Subject must be at most 200 characters".into(),
                });
            }
        }
        Ok(())
    }

    fn validate_in_future(range: &TimeRange, now: DateTime<Utc>) -> DomainResult<()> {
        if range.end() <= now {
            return Err(DomainError::ValidationError {
                field: "time_range".into(),
                reason: "Booking must end in the future".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, hour, min, 0).unwrap()
    }

    fn range(from: (u32, u32), to: (u32, u32)) -> TimeRange {
        TimeRange::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    fn pending_booking() -> Booking {
        Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            Some("Standup".into()),
            at(9, 0),
        )
        .unwrap()
    }

    #[test]
    fn test_create_starts_pending() {
        let booking = pending_booking();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.created_at(), at(9, 0));
        assert!(booking.status_changed_at().is_none());
    }

    #[test]
    fn test_create_rejects_past_window() {
        let result = Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            None,
            at(11, 0),
        );
        assert!(matches!(
            result,
            Err(DomainError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_create_allows_window_already_started() {
        // Only the end must lie in the future.
        let booking = Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            None,
            at(10, 30),
        );
        assert!(booking.is_ok());
    }

    #[test]
    fn test_create_rejects_long_subject() {
        let result = Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            Some("x".repeat(201)),
            at(9, 0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_accepts_subject_at_limit() {
        let result = Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            Some("x".repeat(200)),
            at(9, 0),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_confirm_pending() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.status_changed_at(), Some(at(9, 30)));
    }

    #[test]
    fn test_confirm_twice_fails() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        let result = booking.confirm(at(9, 31));
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_confirm_cancelled_fails() {
        let mut booking = pending_booking();
        booking.cancel(at(9, 15)).unwrap();
        assert!(booking.confirm(at(9, 30)).is_err());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut booking = pending_booking();
        booking.cancel(at(9, 15)).unwrap();
        let stamped = booking.status_changed_at();

        booking.cancel(at(9, 45)).unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
        // No-op cancel does not restamp.
        assert_eq!(booking.status_changed_at(), stamped);
    }

    #[test]
    fn test_cancel_confirmed() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        booking.cancel(at(9, 45)).unwrap();
        assert!(booking.is_cancelled());
    }

    #[test]
    fn test_cancel_completed_fails() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        booking.complete(at(11, 0)).unwrap();
        assert!(booking.cancel(at(11, 30)).is_err());
    }

    #[test]
    fn test_complete_after_end() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        booking.complete(at(11, 0)).unwrap();
        assert_eq!(booking.status(), BookingStatus::Completed);
    }

    #[test]
    fn test_complete_before_end_fails() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        let result = booking.complete(at(10, 59));
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition { .. })
        ));
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_complete_pending_fails() {
        let mut booking = pending_booking();
        assert!(booking.complete(at(11, 30)).is_err());
    }

    #[test]
    fn test_reschedule_pending_keeps_pending() {
        let mut booking = pending_booking();
        booking
            .reschedule(range((14, 0), (15, 0)), at(9, 30))
            .unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.time_range(), range((14, 0), (15, 0)));
        assert_eq!(booking.status_changed_at(), Some(at(9, 30)));
    }

    #[test]
    fn test_reschedule_confirmed_returns_to_pending() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        booking
            .reschedule(range((14, 0), (15, 0)), at(9, 45))
            .unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
    }

    #[test]
    fn test_reschedule_into_past_fails() {
        let mut booking = pending_booking();
        let result = booking.reschedule(range((10, 0), (11, 0)), at(12, 0));
        assert!(matches!(
            result,
            Err(DomainError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_reschedule_cancelled_fails() {
        let mut booking = pending_booking();
        booking.cancel(at(9, 15)).unwrap();
        assert!(booking
            .reschedule(range((14, 0), (15, 0)), at(9, 30))
            .is_err());
    }

    #[test]
    fn test_reschedule_completed_fails() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 30)).unwrap();
        booking.complete(at(11, 0)).unwrap();
        assert!(booking
            .reschedule(range((14, 0), (15, 0)), at(11, 30))
            .is_err());
    }

    #[test]
    fn test_conflicts_with_same_room_overlap() {
        let room = RoomId::new();
        let a = Booking::create(room, UserId::new(), range((10, 0), (11, 0)), None, at(9, 0))
            .unwrap();
        let b = Booking::create(
            room,
            UserId::new(),
            range((10, 30), (11, 30)),
            None,
            at(9, 0),
        )
        .unwrap();
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
    }

    #[test]
    fn test_no_conflict_across_rooms() {
        let a = Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            None,
            at(9, 0),
        )
        .unwrap();
        let b = Booking::create(
            RoomId::new(),
            UserId::new(),
            range((10, 0), (11, 0)),
            None,
            at(9, 0),
        )
        .unwrap();
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn test_no_conflict_with_cancelled() {
        let room = RoomId::new();
        let a = Booking::create(room, UserId::new(), range((10, 0), (11, 0)), None, at(9, 0))
            .unwrap();
        let mut b = a.clone();
        // Same window, but cancelled bookings never conflict.
        b.cancel(at(9, 15)).unwrap();
        assert!(!a.conflicts_with(&b));
        assert!(!b.conflicts_with(&a));
    }

    #[test]
    fn test_status_changed_at_tracks_every_transition() {
        let mut booking = pending_booking();
        booking.confirm(at(9, 10)).unwrap();
        assert_eq!(booking.status_changed_at(), Some(at(9, 10)));

        booking
            .reschedule(range((12, 0), (13, 0)), at(9, 20))
            .unwrap();
        assert_eq!(booking.status_changed_at(), Some(at(9, 20)));

        booking.confirm(at(9, 25)).unwrap();
        booking.complete(at(13, 0)).unwrap();
        assert_eq!(booking.status_changed_at(), Some(at(13, 0)));
    }

    #[test]
    fn test_booking_clone_duration_unchanged() {
        let booking = pending_booking();
        assert_eq!(booking.time_range().duration(), Duration::hours(1));
    }
}
