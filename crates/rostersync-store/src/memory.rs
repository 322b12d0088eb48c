//! In-memory store implementations.
//!
//! [`MemoryCalendarStore`] and [`MemoryPreferences`] back the engine's
//! tests and double as a scratch backend. The calendar store supports
//! failure injection so tests can exercise the non-fatal mutation path
//! and the fatal query path without a real backend.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rostersync_core::TimeWindow;

use crate::error::{StoreError, StoreResult};
use crate::prefs::PreferenceStore;
use crate::record::{CalendarId, CalendarRecord, EntryDraft, EntryId, InstanceRecord};
use crate::store::CalendarStore;

/// One entry as persisted by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// The unique-identifier field; `None` for entries created by
    /// sources that never set one.
    pub uid: Option<String>,
    /// Entry start.
    pub start: DateTime<Utc>,
    /// Entry end.
    pub end: DateTime<Utc>,
    /// Entry title.
    pub title: String,
    /// Entry description.
    pub description: String,
    /// Calendar the entry lives in.
    pub calendar_id: CalendarId,
    /// IANA time zone of the entry.
    pub timezone: String,
}

#[derive(Debug, Default)]
struct Inner {
    calendars: Vec<CalendarRecord>,
    entries: BTreeMap<EntryId, StoredEntry>,
    next_id: u64,
    fail_next_query: bool,
    fail_inserts: bool,
    fail_deletes: bool,
}

/// An in-memory [`CalendarStore`].
#[derive(Debug, Default)]
pub struct MemoryCalendarStore {
    inner: Mutex<Inner>,
}

impl MemoryCalendarStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a calendar row and returns its assigned identifier.
    pub fn add_calendar(
        &self,
        account_name: impl Into<String>,
        account_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> CalendarId {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.next_id += 1;
        let id = CalendarId::new(format!("cal-{}", inner.next_id));
        let account_name = account_name.into();
        inner.calendars.push(CalendarRecord {
            id: id.clone(),
            owner_account: account_name.clone(),
            account_name,
            account_type: account_type.into(),
            display_name: display_name.into(),
        });
        id
    }

    /// Seeds an entry directly, bypassing the [`CalendarStore`] seam.
    ///
    /// Used to plant entries created by "other sources": pass `None` for
    /// `uid` to mimic an entry with no unique-identifier field.
    pub fn seed_entry(
        &self,
        calendar_id: &CalendarId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        uid: Option<&str>,
    ) -> EntryId {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.next_id += 1;
        let id = EntryId::new(format!("entry-{}", inner.next_id));
        inner.entries.insert(
            id.clone(),
            StoredEntry {
                uid: uid.map(str::to_string),
                start,
                end,
                title: title.into(),
                description: String::new(),
                calendar_id: calendar_id.clone(),
                timezone: "UTC".to_string(),
            },
        );
        id
    }

    /// Snapshot of all persisted entries, ordered by identifier.
    pub fn entries(&self) -> Vec<(EntryId, StoredEntry)> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner
            .entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect()
    }

    /// Number of persisted entries.
    pub fn entry_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").entries.len()
    }

    /// Makes the next query call (calendars or instances) fail.
    pub fn fail_next_query(&self) {
        self.inner.lock().expect("store mutex poisoned").fail_next_query = true;
    }

    /// Makes insert calls fail while enabled.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.inner.lock().expect("store mutex poisoned").fail_inserts = fail;
    }

    /// Makes delete calls fail while enabled.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.inner.lock().expect("store mutex poisoned").fail_deletes = fail;
    }
}

impl CalendarStore for MemoryCalendarStore {
    fn calendars(
        &self,
        account_name: &str,
        account_type: &str,
    ) -> StoreResult<Vec<CalendarRecord>> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.fail_next_query {
            inner.fail_next_query = false;
            return Err(StoreError::query("injected calendar query failure"));
        }
        Ok(inner
            .calendars
            .iter()
            .filter(|c| c.account_name == account_name && c.account_type == account_type)
            .cloned()
            .collect())
    }

    fn instances(&self, window: &TimeWindow) -> StoreResult<Vec<InstanceRecord>> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.fail_next_query {
            inner.fail_next_query = false;
            return Err(StoreError::query("injected instance query failure"));
        }
        Ok(inner
            .entries
            .iter()
            .filter(|(_, entry)| window.overlaps(entry.start, entry.end))
            .map(|(id, entry)| InstanceRecord {
                instance_id: format!("{id}-i0"),
                entry_id: id.clone(),
                start: entry.start,
                end: entry.end,
                title: entry.title.clone(),
                uid: entry.uid.clone(),
            })
            .collect())
    }

    fn insert(&self, draft: &EntryDraft) -> StoreResult<EntryId> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.fail_inserts {
            return Err(StoreError::mutation("injected insert failure"));
        }
        inner.next_id += 1;
        let id = EntryId::new(format!("entry-{}", inner.next_id));
        inner.entries.insert(
            id.clone(),
            StoredEntry {
                uid: Some(draft.uid.clone()),
                start: draft.start,
                end: draft.end,
                title: draft.title.clone(),
                description: draft.description.clone(),
                calendar_id: draft.calendar_id.clone(),
                timezone: draft.timezone.clone(),
            },
        );
        Ok(id)
    }

    fn delete(&self, entry_id: &EntryId) -> StoreResult<u64> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.fail_deletes {
            return Err(StoreError::mutation("injected delete failure"));
        }
        Ok(u64::from(inner.entries.remove(entry_id).is_some()))
    }
}

/// An in-memory [`PreferenceStore`].
#[derive(Default)]
pub struct MemoryPreferences {
    strings: Mutex<HashMap<String, String>>,
    sets: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MemoryPreferences {
    /// Creates an empty preference store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a string preference.
    pub fn set_string(&self, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .lock()
            .expect("prefs mutex poisoned")
            .insert(key.into(), value.into());
    }

    /// Stores a string-set preference.
    pub fn set_string_set<I, S>(&self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets.lock().expect("prefs mutex poisoned").insert(
            key.into(),
            values.into_iter().map(Into::into).collect(),
        );
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.strings
            .lock()
            .expect("prefs mutex poisoned")
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn get_string_set(&self, key: &str) -> BTreeSet<String> {
        self.sets
            .lock()
            .expect("prefs mutex poisoned")
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}
