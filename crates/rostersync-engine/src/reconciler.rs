//! The sync session driver.
//!
//! [`Reconciler::sync`] runs three sequential phases, never branching
//! back:
//!
//! 1. **Window**: the session span is the first event's begin through
//!    the last event's end; an empty roster aborts before any store
//!    call.
//! 2. **Delete**: every instance in the window whose unique-identifier
//!    field marks it as created by this system for the roster's owner is
//!    deleted by parent entry id. Recurring instances collapse to one
//!    delete per parent. A failed window query aborts the session before
//!    any insert; a failed individual delete is recorded and the phase
//!    continues.
//! 3. **Insert**: every eligible roster event is handed to the inserter.
//!
//! Phases are not transactional across each other; what succeeded before
//! an abort point stays done. Re-running a sync with the same roster and
//! trigraph removes exactly the entries the previous run created and
//! nothing belonging to other users or other applications.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use rostersync_core::{Roster, SyncTag, TagSequence, TimeWindow};
use rostersync_store::{CalendarStore, EntryId};

use crate::directory::CalendarDirectory;
use crate::error::SyncError;
use crate::inserter::Inserter;
use crate::options::SyncOptions;
use crate::report::{SyncFailure, SyncPhase, SyncReport};

/// Drives one sync session against a calendar store.
#[derive(Debug)]
pub struct Reconciler<'a, S: CalendarStore> {
    store: &'a S,
    directory: CalendarDirectory,
    options: SyncOptions,
}

impl<'a, S: CalendarStore> Reconciler<'a, S> {
    /// Resolves the calendar directory and prepares a session.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Directory`] when the calendar query fails;
    /// no sync phase runs in that case.
    pub fn connect(store: &'a S, options: SyncOptions) -> Result<Self, SyncError> {
        let directory = CalendarDirectory::resolve(store, &options)?;
        Ok(Self {
            store,
            directory,
            options,
        })
    }

    /// Runs a full sync session for the roster, stamped with the current
    /// time.
    pub fn sync(&self, roster: &Roster) -> Result<SyncReport, SyncError> {
        self.sync_at(roster, Utc::now())
    }

    /// Runs a full sync session with an explicit session-start time.
    ///
    /// The start time is embedded in every ownership tag written during
    /// the session; passing it explicitly keeps sessions reproducible.
    pub fn sync_at(
        &self,
        roster: &Roster,
        started_at: DateTime<Utc>,
    ) -> Result<SyncReport, SyncError> {
        let window = roster.window().ok_or(SyncError::EmptyRoster)?;
        info!(
            trigraph = roster.trigraph(),
            events = roster.len(),
            start = %window.start,
            end = %window.end,
            "starting sync session"
        );

        let mut report = SyncReport::default();
        self.delete_owned(&window, roster.trigraph(), &mut report)?;

        let mut tags = TagSequence::new(started_at, roster.trigraph());
        Inserter::new(self.store, &self.directory, &self.options).insert_roster(
            roster,
            &mut tags,
            &mut report,
        );

        info!(
            deleted = report.deleted,
            inserted = report.inserted_count(),
            skipped = report.skipped_events,
            failures = report.failures.len(),
            "sync session finished"
        );
        Ok(report)
    }

    /// Deletion phase: removes this user's previously synced entries
    /// inside the window.
    fn delete_owned(
        &self,
        window: &TimeWindow,
        trigraph: &str,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let instances = self.store.instances(window).map_err(SyncError::Query)?;

        // Instances of one recurring entry share a parent id; delete
        // each parent once.
        let mut seen: HashSet<EntryId> = HashSet::new();
        let mut owned: Vec<EntryId> = Vec::new();
        for instance in &instances {
            let Some(uid) = &instance.uid else {
                continue;
            };
            if SyncTag::owned_by(uid, trigraph) && seen.insert(instance.entry_id.clone()) {
                owned.push(instance.entry_id.clone());
            }
        }
        debug!(
            instances = instances.len(),
            owned = owned.len(),
            "scanned sync window"
        );

        for entry_id in owned {
            match self.store.delete(&entry_id) {
                Ok(rows) => {
                    debug!(%entry_id, rows, "deleted entry");
                    report.deleted += rows;
                }
                Err(error) => {
                    warn!(%entry_id, %error, "delete failed");
                    report.failures.push(SyncFailure {
                        phase: SyncPhase::Delete,
                        subject: entry_id.to_string(),
                        error,
                    });
                }
            }
        }
        Ok(())
    }
}
