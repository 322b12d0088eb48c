//! The outcome of a sync session.
//!
//! A session that runs to completion returns a [`SyncReport`], even when
//! some individual deletes or inserts failed: those land in
//! [`SyncReport::failures`] without changing the outward success of the
//! session.

use rostersync_store::{EntryId, StoreError};

/// The phase a non-fatal failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Deleting previously synced entries.
    Delete,
    /// Inserting fresh entries.
    Insert,
}

/// One non-fatal per-item failure.
#[derive(Debug)]
pub struct SyncFailure {
    /// Which phase the item failed in.
    pub phase: SyncPhase,
    /// What failed: the entry id (delete) or the entry title (insert).
    pub subject: String,
    /// The store error.
    pub error: StoreError,
}

/// Counters and identifiers collected over one sync session.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Rows affected by the deletion phase.
    pub deleted: u64,
    /// Identifiers of the entries created, in insertion order.
    pub inserted: Vec<EntryId>,
    /// Events skipped by category or missing target configuration.
    pub skipped_events: usize,
    /// Per-item failures that did not abort the session.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Number of entries created.
    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }

    /// Returns true when no per-item failure was recorded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_report_is_clean() {
        let report = SyncReport::default();
        assert!(report.is_clean());
        assert_eq!(report.inserted_count(), 0);
        assert_eq!(report.deleted, 0);
    }

    #[test]
    fn failures_mark_the_report_dirty() {
        let mut report = SyncReport::default();
        report.failures.push(SyncFailure {
            phase: SyncPhase::Insert,
            subject: "AF1234 CDG - FCO".to_string(),
            error: StoreError::mutation("quota exceeded"),
        });
        assert!(!report.is_clean());
    }
}
