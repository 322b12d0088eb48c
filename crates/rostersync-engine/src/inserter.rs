//! Insertion phase.
//!
//! Walks the roster in order, turns every insertable event into an
//! [`EntryDraft`] per resolved target calendar, and submits them. A
//! failed insert is recorded and processing continues with the
//! remaining targets and events.

use tracing::{debug, info, warn};

use rostersync_core::{event_description, event_title, PlanningEvent, Roster, TagSequence};
use rostersync_store::{CalendarStore, EntryDraft};

use crate::directory::CalendarDirectory;
use crate::options::{SyncOptions, TargetPolicy};
use crate::report::{SyncFailure, SyncPhase, SyncReport};

pub(crate) struct Inserter<'a, S: CalendarStore> {
    store: &'a S,
    directory: &'a CalendarDirectory,
    options: &'a SyncOptions,
}

impl<'a, S: CalendarStore> Inserter<'a, S> {
    pub(crate) fn new(
        store: &'a S,
        directory: &'a CalendarDirectory,
        options: &'a SyncOptions,
    ) -> Self {
        Self {
            store,
            directory,
            options,
        }
    }

    /// Inserts entries for every eligible roster event, in roster order.
    pub(crate) fn insert_roster(
        &self,
        roster: &Roster,
        tags: &mut TagSequence,
        report: &mut SyncReport,
    ) {
        for event in roster.events() {
            if !self.options.inserts_category(event.category) {
                debug!(category = ?event.category, "event category not insertable, skipping");
                report.skipped_events += 1;
                continue;
            }

            let targets = self.options.targets_for(event.category);
            if targets.is_empty() {
                debug!(
                    category = ?event.category,
                    "no target calendars configured, skipping event"
                );
                report.skipped_events += 1;
                continue;
            }

            // One tag per eligible event, shared by all of its targets.
            let tag = tags.next();
            self.insert_event(event, &tag.encode(), report);
        }
    }

    fn insert_event(&self, event: &PlanningEvent, uid: &str, report: &mut SyncReport) {
        let title = event_title(event);
        let description = event_description(event);

        for name in self.options.targets_for(event.category) {
            let Some(calendar_id) = self.directory.get(name) else {
                continue;
            };

            let draft = EntryDraft {
                uid: uid.to_string(),
                start: event.begin,
                end: event.end,
                title: title.clone(),
                description: description.clone(),
                calendar_id: calendar_id.clone(),
                timezone: self.options.timezone.clone(),
            };

            match self.store.insert(&draft) {
                Ok(entry_id) => {
                    info!(%entry_id, title = %title, calendar = %name, "created entry");
                    report.inserted.push(entry_id);
                    if self.options.target_policy == TargetPolicy::FirstResolved {
                        break;
                    }
                }
                Err(error) => {
                    warn!(title = %title, calendar = %name, %error, "insert failed");
                    report.failures.push(SyncFailure {
                        phase: SyncPhase::Insert,
                        subject: title.clone(),
                        error,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rostersync_core::EventCategory;
    use rostersync_store::MemoryCalendarStore;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn flight(day: u32, number: &str) -> PlanningEvent {
        PlanningEvent::new(
            EventCategory::Flight,
            utc(2025, 2, day, 10, 0, 0),
            utc(2025, 2, day, 12, 0, 0),
        )
        .with_flight(number, "CDG", "FCO")
        .with_function("OPL")
        .with_block_minutes(120)
    }

    fn session_tags() -> TagSequence {
        TagSequence::new(utc(2025, 2, 1, 6, 0, 0), "ABC")
    }

    #[test]
    fn unresolved_targets_are_skipped_silently() {
        let store = MemoryCalendarStore::new();
        store.add_calendar("pilot@example.com", "com.google", "Flights");
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris")
            .with_targets(EventCategory::Flight, ["Nonexistent"]);
        let directory = CalendarDirectory::resolve(&store, &options).unwrap();

        let roster = Roster::new(vec![flight(5, "AF1234")], "ABC");
        let mut report = SyncReport::default();
        Inserter::new(&store, &directory, &options).insert_roster(
            &roster,
            &mut session_tags(),
            &mut report,
        );

        assert_eq!(report.inserted_count(), 0);
        assert!(report.is_clean());
        assert_eq!(store.entry_count(), 0);
    }

    #[test]
    fn first_resolved_policy_stops_after_one_insert() {
        let store = MemoryCalendarStore::new();
        store.add_calendar("pilot@example.com", "com.google", "Flights");
        store.add_calendar("pilot@example.com", "com.google", "Duty");
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris")
            .with_targets(EventCategory::Flight, ["Flights", "Duty"]);
        let directory = CalendarDirectory::resolve(&store, &options).unwrap();

        let roster = Roster::new(vec![flight(5, "AF1234")], "ABC");
        let mut report = SyncReport::default();
        Inserter::new(&store, &directory, &options).insert_roster(
            &roster,
            &mut session_tags(),
            &mut report,
        );

        assert_eq!(report.inserted_count(), 1);
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn all_resolved_policy_fans_out() {
        let store = MemoryCalendarStore::new();
        store.add_calendar("pilot@example.com", "com.google", "Flights");
        store.add_calendar("pilot@example.com", "com.google", "Duty");
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris")
            .with_target_policy(TargetPolicy::AllResolved)
            .with_targets(EventCategory::Flight, ["Flights", "Duty"]);
        let directory = CalendarDirectory::resolve(&store, &options).unwrap();

        let roster = Roster::new(vec![flight(5, "AF1234")], "ABC");
        let mut report = SyncReport::default();
        Inserter::new(&store, &directory, &options).insert_roster(
            &roster,
            &mut session_tags(),
            &mut report,
        );

        assert_eq!(report.inserted_count(), 2);
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn insert_failure_is_recorded_and_processing_continues() {
        let store = MemoryCalendarStore::new();
        store.add_calendar("pilot@example.com", "com.google", "Flights");
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris")
            .with_targets(EventCategory::Flight, ["Flights"]);
        let directory = CalendarDirectory::resolve(&store, &options).unwrap();

        store.set_fail_inserts(true);
        let roster = Roster::new(vec![flight(5, "AF1234"), flight(6, "AF1235")], "ABC");
        let mut report = SyncReport::default();
        Inserter::new(&store, &directory, &options).insert_roster(
            &roster,
            &mut session_tags(),
            &mut report,
        );

        assert_eq!(report.inserted_count(), 0);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().all(|f| f.phase == SyncPhase::Insert));
    }

    #[test]
    fn non_insertable_categories_are_counted_as_skipped() {
        let store = MemoryCalendarStore::new();
        store.add_calendar("pilot@example.com", "com.google", "Flights");
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris")
            .with_targets(EventCategory::Flight, ["Flights"]);
        let directory = CalendarDirectory::resolve(&store, &options).unwrap();

        let training = PlanningEvent::new(
            EventCategory::Training,
            utc(2025, 2, 7, 9, 0, 0),
            utc(2025, 2, 7, 17, 0, 0),
        )
        .with_summary("CRM recurrent");
        let roster = Roster::new(vec![flight(5, "AF1234"), training], "ABC");

        let mut report = SyncReport::default();
        Inserter::new(&store, &directory, &options).insert_roster(
            &roster,
            &mut session_tags(),
            &mut report,
        );

        assert_eq!(report.inserted_count(), 1);
        assert_eq!(report.skipped_events, 1);
    }

    #[test]
    fn tags_carry_the_insert_sequence() {
        let store = MemoryCalendarStore::new();
        store.add_calendar("pilot@example.com", "com.google", "Flights");
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris")
            .with_targets(EventCategory::Flight, ["Flights"]);
        let directory = CalendarDirectory::resolve(&store, &options).unwrap();

        let roster = Roster::new(vec![flight(5, "AF1234"), flight(6, "AF1235")], "ABC");
        let mut report = SyncReport::default();
        Inserter::new(&store, &directory, &options).insert_roster(
            &roster,
            &mut session_tags(),
            &mut report,
        );

        let uids: Vec<String> = store
            .entries()
            .into_iter()
            .map(|(_, entry)| entry.uid.unwrap())
            .collect();
        assert!(uids.iter().any(|uid| uid.ends_with("_ROSTERTOGO_ABC0")));
        assert!(uids.iter().any(|uid| uid.ends_with("_ROSTERTOGO_ABC1")));
    }
}
