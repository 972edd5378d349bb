//! Booking-related DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roomboard_domain::booking::Booking;

/// Command to create a new booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingCommand {
    pub room_id: String,
    pub created_by: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub subject: Option<String>,
}

/// Command to move a booking to a new window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleBookingCommand {
    pub booking_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Booking projection exposed to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingView {
    pub id: String,
    pub room_id: String,
    pub created_by: String,
    pub subject: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub status_changed_at: Option<DateTime<Utc>>,
}

impl BookingView {
    /// Create from domain aggregate
    pub fn from_domain(booking: &Booking) -> Self {
        Self {
            id: booking.id().to_string(),
            room_id: booking.room_id().to_string(),
            created_by: booking.created_by().to_string(),
            subject: booking.subject().map(str::to_string),
            start: booking.time_range().start(),
            end: booking.time_range().end(),
            status: booking.status().to_string(),
            created_at: booking.created_at(),
            status_changed_at: booking.status_changed_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use roomboard_domain::value_objects::{RoomId, TimeRange, UserId};

    #[test]
    fn test_create_booking_command_serialization() {
        let now = Utc::now();
        let cmd = CreateBookingCommand {
            room_id: RoomId::new().to_string(),
            created_by: UserId::new().to_string(),
            start: now + Duration::hours(1),
            end: now + Duration::hours(2),
            subject: Some("Retro".into()),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let parsed: CreateBookingCommand = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.room_id, cmd.room_id);
        assert_eq!(parsed.subject.as_deref(), Some("Retro"));
    }

    #[test]
    fn test_booking_view_from_domain() {
        let now = Utc::now();
        let range = TimeRange::new(now + Duration::hours(1), now + Duration::hours(2)).unwrap();
        let booking =
            Booking::create(RoomId::new(), UserId::new(), range, None, now).unwrap();

        let view = BookingView::from_domain(&booking);
        assert_eq!(view.id, booking.id().to_string());
        assert_eq!(view.status, "Pending");
        assert_eq!(view.start, range.start());
        assert_eq!(view.end, range.end());
        assert!(view.status_changed_at.is_none());
    }
}
