//! The presentation seam.
//!
//! The widget toolkit is an external collaborator: the engine never draws,
//! it only reports what changed and which presentation hints apply. All
//! methods default to no-ops so headless callers implement nothing.

pub trait SyncObserver {
    /// The mirrored tree was rebuilt from scratch.
    fn tree_replaced(&mut self) {}

    /// Expand every currently visible tree row.
    fn expand_all(&mut self) {}

    /// Select the node at `path` (labels from the project level down).
    fn select_path(&mut self, path: &[String]) {
        let _ = path;
    }

    /// A non-fatal, user-facing notice.
    fn notice(&mut self, message: &str) {
        let _ = message;
    }
}

/// Drops every hint; for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SyncObserver for NullObserver {}
