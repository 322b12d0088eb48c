//! Calendar directory resolution.
//!
//! Target calendars are configured by display name; the store addresses
//! them by identifier. [`CalendarDirectory`] bridges the two: it is
//! built once per sync session from the store's calendar rows for the
//! configured account, then consulted read-only by the inserter.

use std::collections::HashMap;

use tracing::{debug, info};

use rostersync_store::{CalendarId, CalendarStore};

use crate::error::SyncError;
use crate::options::SyncOptions;

/// Display-name to identifier mapping for one account's calendars.
///
/// An account with zero calendars (or an unset account name) yields an
/// empty directory; later target lookups find nothing and insertion is
/// skipped silently for those targets.
#[derive(Debug, Default)]
pub struct CalendarDirectory {
    by_name: HashMap<String, CalendarId>,
}

impl CalendarDirectory {
    /// Queries the store and builds the directory for the session.
    ///
    /// # Errors
    ///
    /// A store query failure is fatal for the whole sync session and
    /// surfaces as [`SyncError::Directory`].
    pub fn resolve<S: CalendarStore>(store: &S, options: &SyncOptions) -> Result<Self, SyncError> {
        let records = store
            .calendars(&options.account_name, &options.account_type)
            .map_err(SyncError::Directory)?;

        let by_name: HashMap<String, CalendarId> = records
            .into_iter()
            .map(|record| (record.display_name, record.id))
            .collect();

        info!(
            account = %options.account_name,
            calendars = by_name.len(),
            "resolved calendar directory"
        );
        Ok(Self { by_name })
    }

    /// Looks up a calendar identifier by display name.
    pub fn get(&self, display_name: &str) -> Option<&CalendarId> {
        let id = self.by_name.get(display_name);
        if id.is_none() {
            debug!(target_calendar = display_name, "target calendar not in directory");
        }
        id
    }

    /// Number of calendars in the directory.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true when the account resolved to no calendars.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
