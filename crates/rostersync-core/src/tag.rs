//! Ownership tags for synced calendar entries.
//!
//! Every entry this system creates carries a [`SyncTag`] in the store's
//! unique-identifier (UID) field. The tag marks the entry as
//! system-created and attributes it to one user's trigraph, which is what
//! the deletion phase matches on during the next sync.
//!
//! The encoded form is `<millis>_ROSTERTOGO_<TRI><seq>`: the sync-start
//! timestamp in milliseconds, the marker, the three-character trigraph
//! and the zero-based sequence of the event among the flight-category
//! events processed in that sync. Ownership testing goes through
//! [`SyncTag::owned_by`], which structurally parses the UID and falls
//! back to a substring match for entries written by earlier releases.

use std::fmt;

use chrono::{DateTime, Utc};

/// The marker separating the timestamp from the owner in an encoded tag.
pub const TAG_MARKER: &str = "_ROSTERTOGO_";

/// Length of a user trigraph.
const TRIGRAPH_LEN: usize = 3;

/// The ownership tag written into an entry's UID field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTag {
    /// Sync-start timestamp in milliseconds since the epoch.
    pub stamp_millis: i64,
    /// The owning user's trigraph.
    pub trigraph: String,
    /// Zero-based sequence of the event within its sync session.
    pub sequence: u32,
}

impl SyncTag {
    /// Encodes the tag into its UID-field form.
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}{}",
            self.stamp_millis, TAG_MARKER, self.trigraph, self.sequence
        )
    }

    /// Parses a UID field back into a structured tag.
    ///
    /// Returns `None` when the field does not follow the canonical
    /// encoding; callers that only need ownership should use
    /// [`SyncTag::owned_by`], which also accepts legacy variants.
    pub fn parse(uid: &str) -> Option<SyncTag> {
        let (stamp, rest) = uid.split_once(TAG_MARKER)?;
        let stamp_millis = stamp.parse().ok()?;
        if rest.len() < TRIGRAPH_LEN || !rest.is_char_boundary(TRIGRAPH_LEN) {
            return None;
        }
        let (trigraph, sequence) = rest.split_at(TRIGRAPH_LEN);
        let sequence = sequence.parse().ok()?;
        Some(SyncTag {
            stamp_millis,
            trigraph: trigraph.to_string(),
            sequence,
        })
    }

    /// Checks whether a UID field marks an entry created by this system
    /// for the given trigraph.
    ///
    /// Tries a structural parse first; UIDs that fail to parse are still
    /// accepted when they contain the legacy `_ROSTERTOGO_<TRI>`
    /// substring, so entries written by earlier releases remain eligible
    /// for replacement.
    pub fn owned_by(uid: &str, trigraph: &str) -> bool {
        match Self::parse(uid) {
            Some(tag) => tag.trigraph == trigraph,
            None => {
                let marker = format!("{TAG_MARKER}{trigraph}");
                uid.contains(&marker)
            }
        }
    }
}

impl fmt::Display for SyncTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Issues the tags for one sync session.
///
/// Owns the sync-start timestamp and the per-session counter; each call
/// to [`TagSequence::next`] yields the tag for the next insertable event.
/// The counter tracks events handed to the inserter, not positions in
/// the full roster.
#[derive(Debug)]
pub struct TagSequence {
    stamp_millis: i64,
    trigraph: String,
    next_index: u32,
}

impl TagSequence {
    /// Creates a sequence for a sync session started at `started_at`.
    pub fn new(started_at: DateTime<Utc>, trigraph: impl Into<String>) -> Self {
        Self {
            stamp_millis: started_at.timestamp_millis(),
            trigraph: trigraph.into(),
            next_index: 0,
        }
    }

    /// Yields the tag for the next insertable event.
    pub fn next(&mut self) -> SyncTag {
        let tag = SyncTag {
            stamp_millis: self.stamp_millis,
            trigraph: self.trigraph.clone(),
            sequence: self.next_index,
        };
        self.next_index += 1;
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn encode_parse_roundtrip() {
        let tag = SyncTag {
            stamp_millis: 1738749600000,
            trigraph: "ABC".to_string(),
            sequence: 7,
        };
        assert_eq!(tag.encode(), "1738749600000_ROSTERTOGO_ABC7");
        assert_eq!(SyncTag::parse(&tag.encode()), Some(tag));
    }

    #[test]
    fn parse_rejects_foreign_shapes() {
        assert_eq!(SyncTag::parse(""), None);
        assert_eq!(SyncTag::parse("some-external-uid@example.com"), None);
        assert_eq!(SyncTag::parse("xyz_ROSTERTOGO_ABC0"), None); // non-numeric stamp
        assert_eq!(SyncTag::parse("1738749600000_ROSTERTOGO_AB"), None); // short owner
        assert_eq!(SyncTag::parse("1738749600000_ROSTERTOGO_ABC"), None); // no sequence
    }

    #[test]
    fn owned_by_matches_own_trigraph_only() {
        let uid = "1738749600000_ROSTERTOGO_ABC0";
        assert!(SyncTag::owned_by(uid, "ABC"));
        assert!(!SyncTag::owned_by(uid, "XYZ"));
    }

    #[test]
    fn owned_by_accepts_legacy_uids() {
        // Earlier releases appended extra data after the sequence; the
        // structural parse fails but the substring match still claims it.
        assert!(SyncTag::owned_by("1738749600000_ROSTERTOGO_ABC0-dup", "ABC"));
        assert!(!SyncTag::owned_by("1738749600000_ROSTERTOGO_XYZ0-dup", "ABC"));
    }

    #[test]
    fn owned_by_ignores_untagged_uids() {
        assert!(!SyncTag::owned_by("standup-ABC-weekly", "ABC"));
        assert!(!SyncTag::owned_by("", "ABC"));
    }

    #[test]
    fn sequence_counts_from_zero() {
        let mut tags = TagSequence::new(session_start(), "ABC");
        assert_eq!(tags.next().sequence, 0);
        assert_eq!(tags.next().sequence, 1);
        assert_eq!(tags.next().sequence, 2);
    }

    #[test]
    fn sequence_stamps_session_start() {
        let mut tags = TagSequence::new(session_start(), "ABC");
        let tag = tags.next();
        assert_eq!(tag.stamp_millis, session_start().timestamp_millis());
        assert_eq!(tag.trigraph, "ABC");
    }
}
