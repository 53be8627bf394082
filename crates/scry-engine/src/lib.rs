//! Sync orchestration for scry.
//!
//! Everything here operates on an explicit [`Session`]: the mirrored tree
//! and the run metadata registry are per-session state, never globals, so
//! concurrent sessions (e.g. several open projects) cannot
//! cross-contaminate.

pub mod observer;
pub mod session;
pub mod sync;

pub use observer::{NullObserver, SyncObserver};
pub use session::Session;
pub use sync::{
    analysis_form, full_sync, lookup_line, post_snapshot, refresh_dataset, start_analysis,
    SyncReport, TableData,
};
