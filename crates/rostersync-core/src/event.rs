//! Roster event types.
//!
//! This module provides the read-only input model for a sync session:
//! - [`PlanningEvent`]: one duty on the crew roster (a flight leg, a
//!   dead-head positioning, a training slot, ...)
//! - [`EventCategory`]: the kind of duty, which drives formatting and
//!   insertion eligibility
//! - [`Airport`]: the airport record attached to a flight leg
//! - [`Roster`]: the chronological event sequence plus the owning user's
//!   trigraph

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::TimeWindow;

/// The category of a planning event.
///
/// Only `Flight` and `DeadHead` carry meaningful flight-number and airport
/// fields; the remaining categories fall back to the event's freeform
/// summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// An operating flight leg.
    Flight,
    /// A dead-head (positioning) leg: on board, not operating.
    DeadHead,
    /// A simulator session.
    Simulator,
    /// Ground or classroom training.
    Training,
    /// Ground duty (standby, office, briefing).
    Ground,
    /// A hotel rest period.
    Hotel,
    /// A day off.
    Off,
    /// Anything the roster import could not classify.
    Other,
}

impl EventCategory {
    /// Every category, in declaration order.
    pub const ALL: [EventCategory; 8] = [
        Self::Flight,
        Self::DeadHead,
        Self::Simulator,
        Self::Training,
        Self::Ground,
        Self::Hotel,
        Self::Off,
        Self::Other,
    ];

    /// The suffix used in preference keys (e.g. `calendars.flight`).
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::DeadHead => "dead_head",
            Self::Simulator => "simulator",
            Self::Training => "training",
            Self::Ground => "ground",
            Self::Hotel => "hotel",
            Self::Off => "off",
            Self::Other => "other",
        }
    }

    /// Returns true for categories that represent time on an aircraft.
    pub fn is_leg(&self) -> bool {
        matches!(self, Self::Flight | Self::DeadHead)
    }
}

/// An airport record attached to a flight leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// Three-letter IATA code.
    pub iata: String,
    /// City served by the airport.
    pub city: String,
    /// Full airport name.
    pub name: String,
    /// Country of the airport.
    pub country: String,
}

impl Airport {
    /// Creates a new airport record.
    pub fn new(
        iata: impl Into<String>,
        city: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            iata: iata.into(),
            city: city.into(),
            name: name.into(),
            country: country.into(),
        }
    }
}

/// One duty on the crew roster.
///
/// Produced by the roster import pipeline and consumed read-only by the
/// sync engine. Which fields are meaningful depends on [`EventCategory`]:
/// flight-number, airport and turnaround fields only apply to legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningEvent {
    /// The kind of duty.
    pub category: EventCategory,
    /// Start of the duty.
    pub begin: DateTime<Utc>,
    /// End of the duty. Invariant: `begin <= end`.
    pub end: DateTime<Utc>,
    /// Flight number (legs only).
    pub flight_number: String,
    /// Origin IATA code (legs only).
    pub origin_iata: String,
    /// Destination IATA code (legs only).
    pub destination_iata: String,
    /// Full origin airport record, when the import resolved it.
    pub origin: Option<Airport>,
    /// Full destination airport record, when the import resolved it.
    pub destination: Option<Airport>,
    /// Turnaround offset at destination in minutes; `None` when the
    /// roster carried no turnaround information for this leg.
    pub turnaround_minutes: Option<i32>,
    /// Crew function/role on this duty (e.g. `CDB`, `OPL`).
    pub function: String,
    /// Block time in minutes.
    pub block_minutes: u32,
    /// Crew list text.
    pub crew: String,
    /// Training text.
    pub training: String,
    /// Remark text.
    pub remark: String,
    /// Hotel text.
    pub hotel: String,
    /// Freeform summary, used as the title for non-leg categories.
    pub summary: String,
}

impl PlanningEvent {
    /// Creates a new event with the given category and span.
    ///
    /// # Panics
    ///
    /// Panics if `begin` is after `end`.
    pub fn new(category: EventCategory, begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(begin <= end, "PlanningEvent begin must be <= end");
        Self {
            category,
            begin,
            end,
            flight_number: String::new(),
            origin_iata: String::new(),
            destination_iata: String::new(),
            origin: None,
            destination: None,
            turnaround_minutes: None,
            function: String::new(),
            block_minutes: 0,
            crew: String::new(),
            training: String::new(),
            remark: String::new(),
            hotel: String::new(),
            summary: String::new(),
        }
    }

    /// Builder method to set flight number and IATA codes.
    pub fn with_flight(
        mut self,
        number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.flight_number = number.into();
        self.origin_iata = origin.into();
        self.destination_iata = destination.into();
        self
    }

    /// Builder method to set the origin airport record.
    pub fn with_origin(mut self, airport: Airport) -> Self {
        self.origin = Some(airport);
        self
    }

    /// Builder method to set the destination airport record.
    pub fn with_destination(mut self, airport: Airport) -> Self {
        self.destination = Some(airport);
        self
    }

    /// Builder method to set the turnaround offset.
    pub fn with_turnaround(mut self, minutes: i32) -> Self {
        self.turnaround_minutes = Some(minutes);
        self
    }

    /// Builder method to set the crew function.
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// Builder method to set the block time.
    pub fn with_block_minutes(mut self, minutes: u32) -> Self {
        self.block_minutes = minutes;
        self
    }

    /// Builder method to set the crew list text.
    pub fn with_crew(mut self, crew: impl Into<String>) -> Self {
        self.crew = crew.into();
        self
    }

    /// Builder method to set the training text.
    pub fn with_training(mut self, training: impl Into<String>) -> Self {
        self.training = training.into();
        self
    }

    /// Builder method to set the remark text.
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    /// Builder method to set the hotel text.
    pub fn with_hotel(mut self, hotel: impl Into<String>) -> Self {
        self.hotel = hotel.into();
        self
    }

    /// Builder method to set the freeform summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// The imported roster: a chronological event sequence plus the owning
/// user's trigraph.
///
/// The trigraph is the short unique user code embedded in the ownership
/// tag of every entry this system creates; it is what lets two users
/// share one calendar account without clobbering each other's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    events: Vec<PlanningEvent>,
    trigraph: String,
}

impl Roster {
    /// Creates a roster from a chronologically sorted event sequence.
    pub fn new(events: Vec<PlanningEvent>, trigraph: impl Into<String>) -> Self {
        Self {
            events,
            trigraph: trigraph.into(),
        }
    }

    /// The events in roster order.
    pub fn events(&self) -> &[PlanningEvent] {
        &self.events
    }

    /// The owning user's trigraph.
    pub fn trigraph(&self) -> &str {
        &self.trigraph
    }

    /// Number of events on the roster.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true when the roster carries no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The sync window: first event's begin through last event's end.
    ///
    /// Returns `None` for an empty roster, for which the window is
    /// undefined and a sync must not run.
    pub fn window(&self) -> Option<TimeWindow> {
        let first = self.events.first()?;
        let last = self.events.last()?;
        Some(TimeWindow::new(first.begin, last.end))
    }
}
