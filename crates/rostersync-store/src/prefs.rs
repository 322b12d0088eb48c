//! The preference store trait.
//!
//! User-facing settings (the configured account, the target calendar
//! names per event category) live in a host-owned preference store; the
//! engine reads them through this seam.

use std::collections::BTreeSet;

/// Read access to the host's user preferences.
///
/// Lookups never fail: a missing key yields the caller's default (for
/// strings) or the empty set (for string sets), matching the semantics
/// of the preference backends this mirrors.
pub trait PreferenceStore {
    /// Returns the string stored under `key`, or `default` when unset.
    fn get_string(&self, key: &str, default: &str) -> String;

    /// Returns the string set stored under `key`, or the empty set.
    fn get_string_set(&self, key: &str) -> BTreeSet<String>;
}
