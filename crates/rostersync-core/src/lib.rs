//! Core types: roster events, time windows, ownership tags, entry formatting

pub mod event;
pub mod format;
pub mod tag;
pub mod time;
pub mod tracing;

pub use event::{Airport, EventCategory, PlanningEvent, Roster};
pub use format::{event_description, event_title, format_block_time};
pub use tag::{SyncTag, TagSequence, TAG_MARKER};
pub use time::TimeWindow;
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
