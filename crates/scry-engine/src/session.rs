//! Per-session state.

use scry_adapters::Config;
use scry_core::{AnalysisRunRegistry, HierarchyTree, Selection};

/// All mutable state of one client session: the server configuration, the
/// mirrored hierarchy tree and the run metadata registry.
///
/// Owned exclusively by the active session context; engine operations take
/// it by reference, so at most one mutation is in flight at a time. The
/// `syncing` guard additionally serializes logically overlapping sync
/// requests (a second request is rejected, not raced).
#[derive(Debug, Default)]
pub struct Session {
    pub config: Config,
    pub tree: HierarchyTree,
    pub registry: AnalysisRunRegistry,
    syncing: bool,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Remember the user's tree selection (mirrors the original behavior
    /// of tracking project/snapshot in the configuration).
    pub fn set_selection(&mut self, selection: &Selection) {
        self.config.project_name = selection.project.clone();
        self.config.snapshot_name = selection.snapshot.clone();
    }

    /// The current selection as remembered by the configuration.
    pub fn selection(&self) -> Selection {
        Selection {
            project: self.config.project_name.clone(),
            snapshot: self.config.snapshot_name.clone(),
            analysis: None,
        }
    }

    pub(crate) fn begin_sync(&mut self) -> bool {
        if self.syncing {
            return false;
        }
        self.syncing = true;
        true
    }

    pub(crate) fn end_sync(&mut self) {
        self.syncing = false;
    }
}
