//! Trait seams for the external calendar and preference stores.
//!
//! The sync engine never talks to a concrete backend; it consumes the
//! [`CalendarStore`] and [`PreferenceStore`] traits defined here. The
//! [`memory`] module provides in-memory implementations with failure
//! injection, used by the engine's tests and usable as a scratch backend.

pub mod error;
pub mod memory;
pub mod prefs;
pub mod record;
pub mod store;

pub use error::{StoreError, StoreErrorCode, StoreResult};
pub use memory::{MemoryCalendarStore, MemoryPreferences};
pub use prefs::PreferenceStore;
pub use record::{CalendarId, CalendarRecord, EntryDraft, EntryId, InstanceRecord};
pub use store::CalendarStore;
