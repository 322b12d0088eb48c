//! Record types exchanged with the calendar store.
//!
//! These mirror the fixed schema contract of the external store: a
//! calendar row carries an account name/type and a display name; an
//! entry may recur, and a range query returns *instances* that each
//! point back at their parent entry. Identifiers are opaque strings
//! assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a calendar within the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(String);

impl CalendarId {
    /// Wraps a store-assigned calendar identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CalendarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a calendar entry (the parent record, not one of
/// its instances).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wraps a store-assigned entry identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One calendar row from the store's calendar directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRecord {
    /// Store-assigned identifier.
    pub id: CalendarId,
    /// The account the calendar belongs to (email-like string).
    pub account_name: String,
    /// The provider account type (e.g. `com.google`).
    pub account_type: String,
    /// Human-readable display name; what users pick targets by.
    pub display_name: String,
    /// Owner account of the calendar.
    pub owner_account: String,
}

/// One entry instance returned by a range query.
///
/// A recurring entry yields several instances within a window; they all
/// share the parent `entry_id`, which is what deletion operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Store-assigned identifier of this instance.
    pub instance_id: String,
    /// Identifier of the parent entry.
    pub entry_id: EntryId,
    /// Instance start.
    pub start: DateTime<Utc>,
    /// Instance end.
    pub end: DateTime<Utc>,
    /// Entry title.
    pub title: String,
    /// The entry's unique-identifier field, when set. Entries created by
    /// this system carry their ownership tag here.
    pub uid: Option<String>,
}

/// A new entry to be created in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Ownership tag, written to the store's unique-identifier field.
    pub uid: String,
    /// Entry start.
    pub start: DateTime<Utc>,
    /// Entry end.
    pub end: DateTime<Utc>,
    /// Entry title.
    pub title: String,
    /// Entry description.
    pub description: String,
    /// Target calendar.
    pub calendar_id: CalendarId,
    /// IANA time zone identifier for the entry.
    pub timezone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_are_transparent_strings() {
        let id = CalendarId::new("cal-7");
        assert_eq!(id.as_str(), "cal-7");
        assert_eq!(id.to_string(), "cal-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cal-7\"");
    }

    #[test]
    fn draft_serde_roundtrip() {
        let draft = EntryDraft {
            uid: "1738749600000_ROSTERTOGO_ABC0".to_string(),
            start: Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 2, 5, 12, 5, 0).unwrap(),
            title: "AF1234 CDG - FCO".to_string(),
            description: "Function: OPL\nBlock time: 2:05".to_string(),
            calendar_id: CalendarId::new("cal-1"),
            timezone: "Europe/Paris".to_string(),
        };

        let json = serde_json::to_string(&draft).unwrap();
        let parsed: EntryDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft, parsed);
    }
}
