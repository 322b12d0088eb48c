//! Fatal sync errors.
//!
//! Only the failures that abort a whole session live here. Individual
//! delete or insert failures are non-fatal: they are accumulated in the
//! [`SyncReport`](crate::report::SyncReport) and the session still
//! returns `Ok`.

use rostersync_store::StoreError;
use thiserror::Error;

/// A failure that aborts the sync session.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The roster carries no events, so the sync window is undefined.
    /// Raised before any store mutation.
    #[error("roster contains no events; sync window is undefined")]
    EmptyRoster,

    /// The calendar directory lookup failed; the session never started.
    #[error("calendar directory lookup failed: {0}")]
    Directory(#[source] StoreError),

    /// The instance query for the sync window failed; deletion and
    /// insertion were not attempted.
    #[error("sync window query failed: {0}")]
    Query(#[source] StoreError),
}
