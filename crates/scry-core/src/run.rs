//! Run identity and the session-scoped metadata cache.

use serde_json::Value;
use std::collections::HashMap;

/// A unique analysis run: project -> snapshot -> analysis name.
///
/// Used exclusively as a cache key; identity is structural equality over
/// all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisRun {
    pub project: String,
    pub snapshot: String,
    pub analysis: String,
}

impl AnalysisRun {
    pub fn new(
        project: impl Into<String>,
        snapshot: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            snapshot: snapshot.into(),
            analysis: analysis.into(),
        }
    }
}

/// Cached metadata for one run, as returned by [`AnalysisRunRegistry::lookup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunInfo {
    /// The schema profile the run used, if known.
    pub profile_id: Option<String>,
    /// The opaque server identifier for result retrieval, if known.
    pub run_id: Option<String>,
}

/// Session-scoped cache of analysis metadata.
///
/// Run-keyed entries persist across partial syncs because they are indexed
/// by [`AnalysisRun`] and profile id, never positionally; an entry whose
/// underlying server object was deleted stays stale until overwritten or
/// the session ends. The maps are keyed directly by the structural triple,
/// so a lookup is O(1) and duplicate triples cannot exist.
#[derive(Debug, Default)]
pub struct AnalysisRunRegistry {
    /// run -> profile id (which schema profile the run used).
    profiles: HashMap<AnalysisRun, String>,
    /// run -> low-level server run id.
    run_ids: HashMap<AnalysisRun, String>,
    /// Analysis-type display name -> profile id, from the project catalogs.
    type_profiles: HashMap<String, String>,
    /// Profile id -> raw profile descriptor (options, outputs, attributes).
    descriptors: HashMap<String, Value>,
}

impl AnalysisRunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember which schema profile a run used.
    pub fn record_profile(&mut self, run: AnalysisRun, profile_id: impl Into<String>) {
        self.profiles.insert(run, profile_id.into());
    }

    /// Remember the server's low-level run id for a run.
    pub fn record_run_id(&mut self, run: AnalysisRun, run_id: impl Into<String>) {
        self.run_ids.insert(run, run_id.into());
    }

    /// Map an analysis-type display name to its profile id.
    ///
    /// Populated from a project's analysis catalog; a name seen again
    /// overwrites.
    pub fn record_type_profile(
        &mut self,
        display_name: impl Into<String>,
        profile_id: impl Into<String>,
    ) {
        self.type_profiles
            .insert(display_name.into(), profile_id.into());
    }

    /// Store the raw descriptor for a profile id.
    ///
    /// A profile id seen twice with a different descriptor overwrites
    /// silently; schemas are assumed stable per id.
    pub fn record_descriptor(&mut self, profile_id: impl Into<String>, descriptor: Value) {
        self.descriptors.insert(profile_id.into(), descriptor);
    }

    /// The profile id registered for an analysis-type display name.
    pub fn profile_for_type(&self, display_name: &str) -> Option<&str> {
        self.type_profiles.get(display_name).map(String::as_str)
    }

    /// The known analysis-type display names, sorted.
    pub fn analysis_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.type_profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The raw descriptor for a profile id.
    pub fn descriptor(&self, profile_id: &str) -> Option<&Value> {
        self.descriptors.get(profile_id)
    }

    /// Exact-triple lookup of the cached profile and server run ids.
    ///
    /// A triple differing in any field misses.
    pub fn lookup(&self, project: &str, snapshot: &str, analysis: &str) -> RunInfo {
        let run = AnalysisRun::new(project, snapshot, analysis);
        RunInfo {
            profile_id: self.profiles.get(&run).cloned(),
            run_id: self.run_ids.get(&run).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_returns_recorded_ids_for_exact_triple() {
        let mut registry = AnalysisRunRegistry::new();
        let run = AnalysisRun::new("proj", "snap", "taint");
        registry.record_profile(run.clone(), "X");
        registry.record_run_id(run, "42");

        let info = registry.lookup("proj", "snap", "taint");
        assert_eq!(info.profile_id.as_deref(), Some("X"));
        assert_eq!(info.run_id.as_deref(), Some("42"));
    }

    #[test]
    fn lookup_misses_when_any_field_differs() {
        let mut registry = AnalysisRunRegistry::new();
        let run = AnalysisRun::new("proj", "snap", "taint");
        registry.record_profile(run.clone(), "X");
        registry.record_run_id(run, "42");

        for (p, s, a) in [
            ("other", "snap", "taint"),
            ("proj", "other", "taint"),
            ("proj", "snap", "other"),
        ] {
            let info = registry.lookup(p, s, a);
            assert_eq!(info, RunInfo::default(), "{p}/{s}/{a} should miss");
        }
    }

    #[test]
    fn partial_info_is_reported_field_by_field() {
        let mut registry = AnalysisRunRegistry::new();
        registry.record_run_id(AnalysisRun::new("p", "s", "a"), "7");

        let info = registry.lookup("p", "s", "a");
        assert_eq!(info.profile_id, None);
        assert_eq!(info.run_id.as_deref(), Some("7"));
    }

    #[test]
    fn descriptor_overwrites_silently_per_profile_id() {
        let mut registry = AnalysisRunRegistry::new();
        registry.record_descriptor("prof", json!({"v": 1}));
        registry.record_descriptor("prof", json!({"v": 2}));
        assert_eq!(registry.descriptor("prof"), Some(&json!({"v": 2})));
    }

    #[test]
    fn analysis_types_are_sorted() {
        let mut registry = AnalysisRunRegistry::new();
        registry.record_type_profile("Taint", "p1");
        registry.record_type_profile("Escape", "p2");
        assert_eq!(registry.analysis_types(), vec!["Escape", "Taint"]);
        assert_eq!(registry.profile_for_type("Taint"), Some("p1"));
    }
}
