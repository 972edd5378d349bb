//! Application layer events
//!
//! Application events represent use-case-level facts that are significant
//! to external consumers (webhooks, audit logs, notifications). They are
//! emitted after the owning transaction commits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application-level event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ApplicationEvent {
    // === Room Events ===

    /// Room was created
    RoomCreated {
        room_id: String,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// Room was renamed, resized or toggled
    RoomUpdated {
        room_id: String,
        timestamp: DateTime<Utc>,
    },

    // === Booking Events ===

    /// Booking was created in pending state
    BookingCreated {
        booking_id: String,
        room_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Booking was confirmed
    BookingConfirmed {
        booking_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Booking was cancelled
    BookingCancelled {
        booking_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Booking moved to a new window and went back to pending
    BookingRescheduled {
        booking_id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },

    /// Booking was completed
    BookingCompleted {
        booking_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl ApplicationEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ApplicationEvent::RoomCreated { .. } => "RoomCreated",
            ApplicationEvent::RoomUpdated { .. } => "RoomUpdated",
            ApplicationEvent::BookingCreated { .. } => "BookingCreated",
            ApplicationEvent::BookingConfirmed { .. } => "BookingConfirmed",
            ApplicationEvent::BookingCancelled { .. } => "BookingCancelled",
            ApplicationEvent::BookingRescheduled { .. } => "BookingRescheduled",
            ApplicationEvent::BookingCompleted { .. } => "BookingCompleted",
        }
    }

    /// Get the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ApplicationEvent::RoomCreated { timestamp, .. } => *timestamp,
            ApplicationEvent::RoomUpdated { timestamp, .. } => *timestamp,
            ApplicationEvent::BookingCreated { timestamp, .. } => *timestamp,
            ApplicationEvent::BookingConfirmed { timestamp, .. } => *timestamp,
            ApplicationEvent::BookingCancelled { timestamp, .. } => *timestamp,
            ApplicationEvent::BookingRescheduled { timestamp, .. } => *timestamp,
            ApplicationEvent::BookingCompleted { timestamp, .. } => *timestamp,
        }
    }

    /// Generate a unique event ID
    pub fn generate_event_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Event publisher port
///
/// Infrastructure provides implementations for in-process handlers,
/// message queues, webhooks or audit logging.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an application event
    async fn publish(&self, event: ApplicationEvent);
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ApplicationEvent) {
        // No-op: events are discarded
    }
}

/// In-memory event collector for testing
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: std::sync::Mutex<Vec<ApplicationEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<ApplicationEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clear collected events
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: ApplicationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
