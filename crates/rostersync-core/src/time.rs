//! Time window for roster sync queries.
//!
//! A sync session operates on a single [`TimeWindow`] spanning the roster:
//! from the begin of its first event to the end of its last event. The
//! window is what the deletion phase hands to the calendar store when
//! enumerating instances.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The time span covered by one sync session.
///
/// Represents a closed interval `[start, end]` in UTC. Both bounds are
/// inclusive: the store's instance query is expected to return every
/// instance that overlaps the interval, matching the semantics of the
/// underlying calendar store's range query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Returns the duration of this window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window (both bounds inclusive).
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// Checks if the span `[start, end]` overlaps this window.
    ///
    /// Used by stores to decide which entry instances belong to the
    /// queried range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end && end >= self.start
    }
}
