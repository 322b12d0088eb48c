//! Entry title and description formatting.
//!
//! Pure, deterministic text composition for the calendar entries a sync
//! creates. Formatting never fails: missing optional fields simply omit
//! their section.
//!
//! Layout rules follow the roster import's conventions: leg titles are
//! `<flight> <orig> - <dest>` with an optional turnaround suffix, and
//! descriptions are blank-line-separated sections (departure, arrival,
//! duty details, crew, training, remark, hotel) with exactly one empty
//! line between sections and no trailing separator.

use crate::event::{Airport, EventCategory, PlanningEvent};

/// Renders block time minutes as `H:MM`.
///
/// Hours are unpadded, minutes zero-padded to two digits: 125 minutes
/// renders as `2:05`, 59 minutes as `0:59`.
pub fn format_block_time(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Composes the calendar entry title for an event.
///
/// Legs (Flight/DeadHead) render `<flight> <orig> - <dest>`, suffixed
/// with a turnaround annotation `(TU +<n>)` or `(TU -<n>)` when the
/// roster carried a turnaround offset. Every other category uses the
/// event's own freeform summary, unmodified.
pub fn event_title(event: &PlanningEvent) -> String {
    if !event.category.is_leg() {
        return event.summary.clone();
    }

    let mut title = format!(
        "{} {} - {}",
        event.flight_number, event.origin_iata, event.destination_iata
    );
    if let Some(lag) = event.turnaround_minutes {
        if lag < 0 {
            title.push_str(&format!(" (TU -{})", lag.unsigned_abs()));
        } else {
            title.push_str(&format!(" (TU +{lag})"));
        }
    }
    title
}

/// Composes the calendar entry description for an event.
///
/// Legs get, in order: a departure block when the origin airport is
/// known, an arrival block when the destination airport is known, the
/// duty details (function + block time for flights, a single duration
/// line for dead-heads), the crew text (always appended, even when
/// empty), then training, remark and hotel sections when non-empty.
///
/// Every other category gets a duration line, then training and remark
/// when non-empty.
pub fn event_description(event: &PlanningEvent) -> String {
    let mut sections: Vec<String> = Vec::new();

    if event.category.is_leg() {
        if let Some(airport) = &event.origin {
            sections.push(airport_section("Departure:", airport));
        }
        if let Some(airport) = &event.destination {
            sections.push(airport_section("Arrival:", airport));
        }

        if event.category == EventCategory::Flight {
            sections.push(format!(
                "Function: {}\nBlock time: {}",
                event.function,
                format_block_time(event.block_minutes)
            ));
        } else {
            sections.push(format!(
                "Duration: {}",
                format_block_time(event.block_minutes)
            ));
        }

        // The crew paragraph is kept even when empty so that a roster
        // without crew data still renders the same section order.
        sections.push(event.crew.clone());

        if !event.training.is_empty() {
            sections.push(event.training.clone());
        }
        if !event.remark.is_empty() {
            sections.push(event.remark.clone());
        }
        if !event.hotel.is_empty() {
            sections.push(format!("Hotel:\n{}", event.hotel));
        }
    } else {
        sections.push(format!(
            "Duration: {}",
            format_block_time(event.block_minutes)
        ));
        if !event.training.is_empty() {
            sections.push(event.training.clone());
        }
        if !event.remark.is_empty() {
            sections.push(event.remark.clone());
        }
    }

    sections.join("\n\n")
}

fn airport_section(label: &str, airport: &Airport) -> String {
    format!(
        "{label}\n{} / {}\n{}",
        airport.city.to_uppercase(),
        airport.name,
        airport.country
    )
}
