//! Value objects representing immutable domain concepts

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Room identifier - a UUID-based identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(uuid::Uuid);

impl RoomId {
    /// Generate a new random room ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from string representation
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

/// Booking identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(uuid::Uuid);

impl BookingId {
    /// Generate a new random booking ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from string representation
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of the user a booking was created by.
///
/// Opaque to the scheduling core; identity resolution happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Generate a new random user ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from string representation
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// A time interval with a strictly positive length.
///
/// The interval is treated as half-open for scheduling purposes: two ranges
/// that merely share a boundary instant do not overlap, so back-to-back
/// bookings are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a new time range.
    ///
    /// # Errors
    /// Returns `InvalidTimeRange` when `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidTimeRange {
                reason: "End must be strictly after start".into(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when the two ranges share more than a boundary instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `instant` falls within the range, boundaries included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Move both endpoints by `delta`, preserving the duration.
    pub fn shift(&self, delta: Duration) -> TimeRange {
        TimeRange {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Move only the end by `delta`.
    ///
    /// # Errors
    /// Returns `InvalidTimeRange` when shrinking past the start.
    pub fn expand(&self, delta: Duration) -> DomainResult<TimeRange> {
        TimeRange::new(self.start, self.end + delta)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn test_create_valid_range() {
        let range = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        assert_eq!(range.duration(), Duration::hours(1));
    }

    #[test]
    fn test_create_rejects_end_before_start() {
        let result = TimeRange::new(at(11, 0), at(10, 0));
        assert!(matches!(
            result,
            Err(DomainError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn test_create_rejects_zero_length() {
        let result = TimeRange::new(at(10, 0), at(10, 0));
        assert!(result.is_err());
    }

    #[test]
    fn test_overlapping_ranges() {
        let a = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let b = TimeRange::new(at(10, 30), at(11, 30)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let a = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let b = TimeRange::new(at(11, 0), at(12, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_range_overlaps() {
        let outer = TimeRange::new(at(9, 0), at(12, 0)).unwrap();
        let inner = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        assert!(range.contains(at(10, 0)));
        assert!(range.contains(at(10, 30)));
        assert!(range.contains(at(11, 0)));
        assert!(!range.contains(at(11, 1)));
    }

    #[test]
    fn test_shift_preserves_duration() {
        let range = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let shifted = range.shift(Duration::minutes(90));
        assert_eq!(shifted.start(), at(11, 30));
        assert_eq!(shifted.end(), at(12, 30));
        assert_eq!(shifted.duration(), range.duration());
    }

    #[test]
    fn test_shift_backwards() {
        let range = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let shifted = range.shift(Duration::hours(-1));
        assert_eq!(shifted.start(), at(9, 0));
    }

    #[test]
    fn test_expand_extends_end() {
        let range = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let expanded = range.expand(Duration::minutes(30)).unwrap();
        assert_eq!(expanded.start(), at(10, 0));
        assert_eq!(expanded.end(), at(11, 30));
    }

    #[test]
    fn test_expand_cannot_shrink_past_start() {
        let range = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let result = range.expand(Duration::hours(-2));
        assert!(result.is_err());
    }

    #[test]
    fn test_structural_equality() {
        let a = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        let b = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        assert_eq!(a, b);
    }
}
