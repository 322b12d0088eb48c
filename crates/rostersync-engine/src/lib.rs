//! Sync driver: directory resolution, reconciliation, insertion.
//!
//! A sync session wires the pieces together like this:
//!
//! ```ignore
//! let options = SyncOptions::from_prefs(&prefs, "Europe/Paris");
//! let reconciler = Reconciler::connect(&store, options)?;
//! let report = reconciler.sync(&roster)?;
//! ```
//!
//! [`Reconciler::sync`] runs the three phases of a session in order:
//! window computation, deletion of the entries this system previously
//! created for the roster's owner, and insertion of fresh entries for
//! every eligible roster event.

pub mod directory;
pub mod error;
mod inserter;
pub mod options;
pub mod reconciler;
pub mod report;

pub use directory::CalendarDirectory;
pub use error::SyncError;
pub use options::{SyncOptions, TargetPolicy, DEFAULT_ACCOUNT_TYPE};
pub use reconciler::Reconciler;
pub use report::{SyncFailure, SyncPhase, SyncReport};
