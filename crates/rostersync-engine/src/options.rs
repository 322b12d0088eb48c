//! Sync session options.
//!
//! [`SyncOptions`] gathers everything a session needs besides the roster
//! itself: the calendar account to resolve against, the time zone to
//! stamp on created entries, which event categories materialize as
//! calendar entries, and which target calendars each category goes to.
//!
//! Options can be built programmatically or loaded from a
//! [`PreferenceStore`] with [`SyncOptions::from_prefs`], which reads the
//! namespaced keys in [`keys`].

use std::collections::{BTreeMap, BTreeSet};

use rostersync_core::EventCategory;
use rostersync_store::PreferenceStore;

/// The fixed provider account type calendars are matched against.
pub const DEFAULT_ACCOUNT_TYPE: &str = "com.google";

/// Preference keys read by [`SyncOptions::from_prefs`].
pub mod keys {
    use rostersync_core::EventCategory;

    /// The configured account identifier (email-like string).
    pub const ACCOUNT_EMAIL: &str = "account.email";

    /// The target-calendar set for one event category
    /// (e.g. `calendars.flight`).
    pub fn targets(category: EventCategory) -> String {
        format!("calendars.{}", category.key_suffix())
    }
}

/// How many of the configured target calendars an event materializes
/// into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetPolicy {
    /// Stop after the first target that resolves and accepts the insert.
    #[default]
    FirstResolved,
    /// Insert into every target that resolves.
    AllResolved,
}

/// Everything a sync session needs besides the roster.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Account name the calendar directory is resolved for.
    pub account_name: String,
    /// Provider account type, [`DEFAULT_ACCOUNT_TYPE`] unless overridden.
    pub account_type: String,
    /// IANA time zone stamped on created entries.
    pub timezone: String,
    /// Target fan-out policy.
    pub target_policy: TargetPolicy,
    /// Categories that materialize as calendar entries.
    pub insert_categories: BTreeSet<EventCategory>,
    targets: BTreeMap<EventCategory, BTreeSet<String>>,
}

impl SyncOptions {
    /// Creates options with the default policy: flights only, first
    /// resolved target, `com.google` account type.
    pub fn new(account_name: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
            timezone: timezone.into(),
            target_policy: TargetPolicy::default(),
            insert_categories: BTreeSet::from([EventCategory::Flight]),
            targets: BTreeMap::new(),
        }
    }

    /// Loads options from a preference store.
    ///
    /// Reads the account identifier and the per-category target sets; an
    /// unset account yields empty-string account options, which later
    /// resolve to an empty calendar directory rather than an error.
    pub fn from_prefs(prefs: &dyn PreferenceStore, timezone: impl Into<String>) -> Self {
        let mut options = Self::new(prefs.get_string(keys::ACCOUNT_EMAIL, ""), timezone);
        for category in EventCategory::ALL {
            let targets = prefs.get_string_set(&keys::targets(category));
            if !targets.is_empty() {
                options.targets.insert(category, targets);
            }
        }
        options
    }

    /// Builder method to override the account type.
    #[must_use]
    pub fn with_account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = account_type.into();
        self
    }

    /// Builder method to set the target fan-out policy.
    #[must_use]
    pub fn with_target_policy(mut self, policy: TargetPolicy) -> Self {
        self.target_policy = policy;
        self
    }

    /// Builder method to set the insertable category set.
    #[must_use]
    pub fn with_insert_categories(
        mut self,
        categories: impl IntoIterator<Item = EventCategory>,
    ) -> Self {
        self.insert_categories = categories.into_iter().collect();
        self
    }

    /// Builder method to set the target calendars for one category.
    #[must_use]
    pub fn with_targets<I, S>(mut self, category: EventCategory, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets
            .insert(category, names.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true when events of this category materialize as entries.
    pub fn inserts_category(&self, category: EventCategory) -> bool {
        self.insert_categories.contains(&category)
    }

    /// The configured target display names for a category.
    ///
    /// The returned set is empty when the user configured none, in which
    /// case events of that category are skipped without error.
    pub fn targets_for(&self, category: EventCategory) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.targets.get(&category).unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostersync_store::MemoryPreferences;

    #[test]
    fn defaults_preserve_flights_only_first_target() {
        let options = SyncOptions::new("pilot@example.com", "Europe/Paris");
        assert_eq!(options.account_type, DEFAULT_ACCOUNT_TYPE);
        assert_eq!(options.target_policy, TargetPolicy::FirstResolved);
        assert!(options.inserts_category(EventCategory::Flight));
        assert!(!options.inserts_category(EventCategory::DeadHead));
        assert!(options.targets_for(EventCategory::Flight).is_empty());
    }

    #[test]
    fn from_prefs_reads_account_and_targets() {
        let prefs = MemoryPreferences::new();
        prefs.set_string(keys::ACCOUNT_EMAIL, "pilot@example.com");
        prefs.set_string_set(keys::targets(EventCategory::Flight), ["Flights", "Duty"]);
        prefs.set_string_set(keys::targets(EventCategory::Training), ["Training"]);

        let options = SyncOptions::from_prefs(&prefs, "Europe/Paris");
        assert_eq!(options.account_name, "pilot@example.com");
        assert_eq!(options.targets_for(EventCategory::Flight).len(), 2);
        assert_eq!(options.targets_for(EventCategory::Training).len(), 1);
        assert!(options.targets_for(EventCategory::DeadHead).is_empty());
    }

    #[test]
    fn from_prefs_tolerates_missing_account() {
        let prefs = MemoryPreferences::new();
        let options = SyncOptions::from_prefs(&prefs, "UTC");
        assert_eq!(options.account_name, "");
    }

    #[test]
    fn target_key_names() {
        assert_eq!(keys::targets(EventCategory::Flight), "calendars.flight");
        assert_eq!(keys::targets(EventCategory::DeadHead), "calendars.dead_head");
    }

    #[test]
    fn builders_extend_the_policy() {
        let options = SyncOptions::new("pilot@example.com", "UTC")
            .with_target_policy(TargetPolicy::AllResolved)
            .with_insert_categories([EventCategory::Flight, EventCategory::DeadHead])
            .with_targets(EventCategory::DeadHead, ["Duty"]);

        assert_eq!(options.target_policy, TargetPolicy::AllResolved);
        assert!(options.inserts_category(EventCategory::DeadHead));
        assert!(options.targets_for(EventCategory::DeadHead).contains("Duty"));
    }
}
