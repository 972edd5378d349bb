//! Room entity
//!
//! A bookable resource with a fixed seat count and an active flag. Rooms are
//! never hard-deleted by the scheduling core; deactivating a room takes it
//! out of circulation instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{RoomId, TimeRange};

/// Maximum length of a room name
const MAX_NAME_LEN: usize = 100;

/// Room entity
///
/// Name uniqueness across rooms is case-insensitive and enforced at the
/// use-case layer through the repository; the entity validates shape only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Immutable identity
    id: RoomId,

    /// Display name (non-empty, max 100 chars)
    name: String,

    /// Optional free-form location
    location: Option<String>,

    /// Seat count (> 0)
    capacity: u32,

    /// Inactive rooms accept no bookings
    is_active: bool,

    /// Creation timestamp (immutable)
    created_at: DateTime<Utc>,

    /// Set on any mutation
    updated_at: Option<DateTime<Utc>>,
}

impl Room {
    /// Create a new active room.
    ///
    /// # Errors
    /// Returns `ValidationError` when the name is empty or too long, or when
    /// the capacity is zero.
    pub fn create(
        name: String,
        location: Option<String>,
        capacity: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::validate_name(&name)?;
        Self::validate_capacity(capacity)?;

        Ok(Self {
            id: RoomId::new(),
            name,
            location,
            capacity,
            is_active: true,
            created_at: now,
            updated_at: None,
        })
    }

    /// Rename the room
    pub fn rename(&mut self, new_name: String, now: DateTime<Utc>) -> DomainResult<()> {
        Self::validate_name(&new_name)?;
        self.name = new_name;
        self.touch(now);
        Ok(())
    }

    /// Change the seat count
    pub fn update_capacity(&mut self, capacity: u32, now: DateTime<Utc>) -> DomainResult<()> {
        Self::validate_capacity(capacity)?;
        self.capacity = capacity;
        self.touch(now);
        Ok(())
    }

    /// Change the location
    pub fn update_location(&mut self, location: Option<String>, now: DateTime<Utc>) {
        self.location = location;
        self.touch(now);
    }

    /// Put the room back into circulation
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.touch(now);
    }

    /// Take the room out of circulation; existing bookings stay untouched
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.touch(now);
    }

    /// Availability predicate for a candidate window.
    ///
    /// Pure and deterministic given its inputs. An inactive room is never
    /// available; cancelled bookings are ignored; a window that only touches
    /// an existing booking's boundary does not collide with it.
    pub fn is_available(&self, requested: &TimeRange, existing: &[Booking]) -> bool {
        if !self.is_active {
            return false;
        }
        existing
            .iter()
            .filter(|b| b.room_id() == self.id && !b.is_cancelled())
            .all(|b| !b.overlaps(requested))
    }

    // === Getters ===

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    // === Internals ===

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn validate_name(name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError {
                field: "name".into(),
                reason: "Name must not be empty".into(),
            });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::ValidationError {
                field: "name".into(),
                reason: "Name must be at most 100 characters".into(),
            });
        }
        Ok(())
    }

    fn validate_capacity(capacity: u32) -> DomainResult<()> {
        if capacity == 0 {
            return Err(DomainError::ValidationError {
                field: "capacity".into(),
                reason: "Capacity must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
