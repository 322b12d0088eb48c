//! The calendar store trait.
//!
//! This is the narrow seam between the sync engine and whatever backend
//! actually persists calendar entries. The engine issues every call
//! sequentially and blocks on it; there is no cancellation or timeout
//! handling at this layer.

use rostersync_core::TimeWindow;

use crate::error::StoreResult;
use crate::record::{CalendarRecord, EntryDraft, EntryId, InstanceRecord};

/// Query, insert and delete primitives of the external calendar store.
///
/// # Implementation Notes
///
/// - `instances` must return every instance overlapping the window,
///   expanding recurring entries; all instances of one recurring entry
///   share their parent `entry_id`.
/// - `delete` addresses the parent entry, not an instance, and reports
///   the number of rows affected. Deleting an id that no longer exists
///   is a harmless no-op returning `Ok(0)`.
pub trait CalendarStore {
    /// Lists calendars whose account name and account type both match.
    ///
    /// An account with no calendars yields an empty vector, not an error.
    fn calendars(
        &self,
        account_name: &str,
        account_type: &str,
    ) -> StoreResult<Vec<CalendarRecord>>;

    /// Enumerates entry instances overlapping the window.
    fn instances(&self, window: &TimeWindow) -> StoreResult<Vec<InstanceRecord>>;

    /// Creates a new entry, returning its store-assigned identifier.
    fn insert(&self, draft: &EntryDraft) -> StoreResult<EntryId>;

    /// Deletes an entry by its parent identifier, returning rows affected.
    fn delete(&self, entry_id: &EntryId) -> StoreResult<u64>;
}
