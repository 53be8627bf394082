//! The sync coordinator: full hierarchy sync, the narrow dataset refresh,
//! and the actions hanging off the mirrored tree (start analysis, line
//! lookup, snapshot posting).
//!
//! Partial failure is per-branch, not global: one snapshot's configuration
//! fetch failing must not prevent sibling snapshots or projects from
//! completing their portion of the sync. Remote calls are suspension
//! points; nothing else may mutate the session while one sync runs.

use crate::observer::SyncObserver;
use crate::session::Session;
use anyhow::{Context, Result};
use scry_adapters::remote::{OutputPage, Remote, ANALYSIS_CONFIG};
use scry_core::records::{
    self, AnalysisTypeRecord, LineResult, ProjectRecord, SnapshotRecord,
};
use scry_core::{dataset, form, AnalysisRun, Selection};
use serde_json::Value;
use std::path::Path;

/// What a full sync touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub projects: usize,
    pub snapshots: usize,
    pub analyses: usize,
    /// Branches abandoned because of remote failures or malformed records.
    pub skipped: usize,
}

/// A resolved output table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Rebuild the mirrored tree and the run metadata registry from scratch.
///
/// Credentials are checked before any network call. Overlapping requests
/// against the same session are serialized by rejection: the second call
/// fails without touching the tree. A failure mid-repopulation can leave a
/// partially empty tree; prior state is never half-merged.
pub async fn full_sync<R: Remote + ?Sized>(
    session: &mut Session,
    remote: &R,
    observer: &mut dyn SyncObserver,
) -> Result<SyncReport> {
    session.config.require_credentials()?;
    if !session.begin_sync() {
        anyhow::bail!("A sync is already in progress.");
    }
    let result = run_full_sync(session, remote, observer).await;
    session.end_sync();
    result
}

async fn run_full_sync<R: Remote + ?Sized>(
    session: &mut Session,
    remote: &R,
    observer: &mut dyn SyncObserver,
) -> Result<SyncReport> {
    let user = session.config.user.clone();
    let current_project = session.config.project_name.clone();
    let mut report = SyncReport::default();

    let response = remote
        .list_projects(&user)
        .await
        .context("Could not reach the server.")?;

    let mut project_names = Vec::new();
    let mut remembered: Option<String> = None;
    for record in records::results(&response) {
        match ProjectRecord::from_record(record) {
            Some(project) => {
                tracing::debug!(name = %project.name, "found project");
                if current_project.as_deref() == Some(project.name.as_str()) {
                    remembered = Some(project.name.clone());
                }
                project_names.push(project.name);
            }
            None => {
                tracing::warn!(?record, "skipping malformed project record");
                report.skipped += 1;
            }
        }
    }
    report.projects = project_names.len();

    // Clear-then-insert so stale nodes cannot leak into a half-updated
    // tree.
    session.tree.clear();
    session.tree.add_sorted_children(&[], project_names.clone());
    observer.tree_replaced();
    observer.expand_all();

    for project in &project_names {
        sync_project(session, remote, observer, &user, project, &mut report).await;
    }

    if let Some(name) = remembered {
        observer.select_path(&[name]);
    }
    Ok(report)
}

/// One project's branch: the analysis-type catalog and the snapshot list.
/// Either fetch failing abandons only this branch.
async fn sync_project<R: Remote + ?Sized>(
    session: &mut Session,
    remote: &R,
    observer: &mut dyn SyncObserver,
    user: &str,
    project: &str,
    report: &mut SyncReport,
) {
    match remote.get_project_analyses(user, project).await {
        Ok(response) => {
            for record in records::results(&response) {
                match AnalysisTypeRecord::from_record(record) {
                    Some(analysis_type) => {
                        if let Some(profile) = analysis_type.profile_id {
                            session
                                .registry
                                .record_type_profile(&analysis_type.display_name, &profile);
                            session
                                .registry
                                .record_descriptor(&profile, Value::Object(record.clone()));
                        }
                    }
                    None => {
                        tracing::warn!(project, ?record, "skipping malformed analysis type");
                        report.skipped += 1;
                    }
                }
            }
        }
        Err(err) => {
            tracing::warn!(project, error = %err, "analysis catalog fetch failed");
            observer.notice(&format!("Could not load analysis types for {project}."));
            report.skipped += 1;
        }
    }

    let snapshots = match remote.list_snapshots(user, project).await {
        Ok(response) => records::results(&response)
            .filter_map(SnapshotRecord::from_record)
            .map(|snapshot| snapshot.display_name)
            .collect::<Vec<_>>(),
        Err(err) => {
            tracing::warn!(project, error = %err, "snapshot list fetch failed");
            observer.notice(&format!("Could not load snapshots for {project}."));
            report.skipped += 1;
            return;
        }
    };
    report.snapshots += snapshots.len();
    session
        .tree
        .add_sorted_children(&[project], snapshots.clone());

    for snapshot in &snapshots {
        sync_snapshot(session, remote, user, project, snapshot, report).await;
    }
}

/// One snapshot's branch: its configured analyses. A missing or erroring
/// configuration is tolerated so sibling snapshots still complete.
async fn sync_snapshot<R: Remote + ?Sized>(
    session: &mut Session,
    remote: &R,
    user: &str,
    project: &str,
    snapshot: &str,
    report: &mut SyncReport,
) {
    let configuration = match remote
        .get_configuration(user, project, snapshot, ANALYSIS_CONFIG)
        .await
    {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(project, snapshot, error = %err, "no snapshot configuration");
            report.skipped += 1;
            return;
        }
    };

    let mut names = Vec::new();
    for analysis in records::configured_analyses(&configuration) {
        let run = AnalysisRun::new(project, snapshot, &analysis.display_name);
        if let Some(profile) = analysis.profile {
            session.registry.record_profile(run.clone(), profile);
        }
        if let Some(id) = analysis.id {
            session.registry.record_run_id(run, id);
        }
        names.push(analysis.display_name);
    }
    report.analyses += names.len();
    session
        .tree
        .add_sorted_children(&[project, snapshot], names);
}

/// Fetch one page of the output table for the selected analysis.
///
/// Selection gaps are user errors and reported as such; a cache miss
/// (unknown run, profile or output id) means "no such output" and yields
/// an empty table without a network call.
pub async fn refresh_dataset<R: Remote + ?Sized>(
    session: &Session,
    remote: &R,
    selection: &Selection,
    output_id: &str,
    page: &OutputPage,
) -> Result<TableData> {
    let (Some(project), Some(snapshot), Some(analysis)) = (
        selection.project.as_deref(),
        selection.snapshot.as_deref(),
        selection.analysis.as_deref(),
    ) else {
        anyhow::bail!("Select a project, snapshot and analysis in the code tree first.");
    };

    let info = session.registry.lookup(project, snapshot, analysis);
    let (Some(profile_id), Some(run_id)) = (info.profile_id, info.run_id) else {
        tracing::debug!(project, snapshot, analysis, "no cached run metadata");
        return Ok(TableData::default());
    };
    let Some(descriptor) = session.registry.descriptor(&profile_id) else {
        tracing::debug!(profile_id, "no cached profile descriptor");
        return Ok(TableData::default());
    };

    let resolved = dataset::resolve_columns(descriptor, output_id);
    if resolved.is_empty() {
        return Ok(TableData::default());
    }

    let response = remote
        .get_output(
            &session.config.user,
            project,
            snapshot,
            ANALYSIS_CONFIG,
            &run_id,
            output_id,
            page,
        )
        .await
        .context("Could not reach the server.")?;

    let rows = records::results(&response)
        .map(|record| dataset::extract_row(record, &resolved.attribute_ids))
        .collect();
    Ok(TableData {
        columns: resolved.columns,
        rows,
    })
}

/// Build the option form for an analysis type from its cached profile
/// descriptor.
pub fn analysis_form(session: &Session, analysis_type: &str) -> Result<form::FormModel> {
    let profile = session
        .registry
        .profile_for_type(analysis_type)
        .with_context(|| format!("No profile for analysis: {analysis_type}"))?;
    let descriptor = session
        .registry
        .descriptor(profile)
        .with_context(|| format!("No profile info for profile: {profile}"))?;
    let options = descriptor
        .get("options")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    Ok(form::build_form(options))
}

/// Start an analysis of `analysis_type` on the selected project/snapshot
/// with the form's serialized options. Fire-and-forget on the wire.
pub async fn start_analysis<R: Remote + ?Sized>(
    session: &Session,
    remote: &R,
    analysis_type: &str,
    form: &form::FormModel,
) -> Result<()> {
    let profile = session
        .registry
        .profile_for_type(analysis_type)
        .with_context(|| format!("No profile for analysis: {analysis_type}"))?;
    let Some(project) = session.config.project_name.as_deref() else {
        anyhow::bail!("No project selected in the code tree.");
    };
    let Some(snapshot) = session.config.snapshot_name.as_deref() else {
        anyhow::bail!("No snapshot selected in the code tree.");
    };

    let options = form.serialize();
    tracing::debug!(analysis_type, ?options, "starting analysis");
    remote
        .analyze(
            &session.config.user,
            project,
            snapshot,
            ANALYSIS_CONFIG,
            profile,
            &options,
        )
        .await
        .context("Could not reach the server.")
}

/// Query the server for results about one source line of a file.
pub async fn lookup_line<R: Remote + ?Sized>(
    session: &Session,
    remote: &R,
    file: &str,
    line: u32,
) -> Result<Vec<LineResult>> {
    let Some(project) = session.config.project_name.as_deref() else {
        anyhow::bail!("No project selected in the code tree.");
    };
    let Some(snapshot) = session.config.snapshot_name.as_deref() else {
        anyhow::bail!("No snapshot selected in the code tree.");
    };

    let response = remote
        .get_symbols(
            &session.config.user,
            project,
            snapshot,
            ANALYSIS_CONFIG,
            file,
            &line.to_string(),
        )
        .await
        .context("Could not reach the server.")?;
    Ok(records::results(&response)
        .filter_map(LineResult::from_record)
        .collect())
}

/// Post the code under `project_dir` as a snapshot via the bundled CLI,
/// then run a full sync. The subprocess blocks on I/O, so it runs on a
/// blocking worker; the follow-up sync goes through the same
/// serialization guard as any other sync request.
pub async fn post_snapshot<R: Remote + ?Sized>(
    session: &mut Session,
    remote: &R,
    observer: &mut dyn SyncObserver,
    archive: &Path,
    project_dir: &Path,
    project_name: &str,
) -> Result<SyncReport> {
    let archive = archive.to_path_buf();
    let dir = project_dir.to_path_buf();
    let name = project_name.to_string();
    let config = session.config.clone();

    tokio::task::spawn_blocking(move || {
        scry_adapters::poster::post_with_cli(&archive, &dir, &name, &config, |line| {
            tracing::info!(target: "scry::poster", "{line}");
        })
    })
    .await
    .context("Snapshot post was aborted")??;

    observer.notice("Snapshot posted.");
    full_sync(session, remote, observer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;
    use futures::future::BoxFuture;
    use scry_adapters::Config;
    use serde_json::json;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockRemote {
        projects: Value,
        catalogs: HashMap<String, Value>,
        snapshots: HashMap<String, Value>,
        configurations: HashMap<(String, String), Value>,
        failing_configurations: HashSet<(String, String)>,
        output: Value,
        symbols: Value,
        calls: Mutex<Vec<String>>,
    }

    impl MockRemote {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn output_calls(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|c| c.starts_with("get_output"))
                .collect()
        }
    }

    impl Remote for MockRemote {
        fn list_projects<'a>(&'a self, user: &'a str) -> BoxFuture<'a, Result<Value>> {
            self.log(format!("list_projects {user}"));
            Box::pin(async move { Ok(self.projects.clone()) })
        }

        fn list_snapshots<'a>(
            &'a self,
            _user: &'a str,
            project: &'a str,
        ) -> BoxFuture<'a, Result<Value>> {
            self.log(format!("list_snapshots {project}"));
            Box::pin(async move {
                Ok(self
                    .snapshots
                    .get(project)
                    .cloned()
                    .unwrap_or_else(|| json!({"results": []})))
            })
        }

        fn get_project_analyses<'a>(
            &'a self,
            _user: &'a str,
            project: &'a str,
        ) -> BoxFuture<'a, Result<Value>> {
            self.log(format!("get_project_analyses {project}"));
            Box::pin(async move {
                Ok(self
                    .catalogs
                    .get(project)
                    .cloned()
                    .unwrap_or_else(|| json!({"results": []})))
            })
        }

        fn get_configuration<'a>(
            &'a self,
            _user: &'a str,
            project: &'a str,
            snapshot: &'a str,
            _config: &'a str,
        ) -> BoxFuture<'a, Result<Value>> {
            self.log(format!("get_configuration {project}/{snapshot}"));
            let key = (project.to_string(), snapshot.to_string());
            Box::pin(async move {
                if self.failing_configurations.contains(&key) {
                    anyhow::bail!("boom");
                }
                self.configurations
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("no snapshot data"))
            })
        }

        fn analyze<'a>(
            &'a self,
            _user: &'a str,
            project: &'a str,
            snapshot: &'a str,
            _config: &'a str,
            profile_id: &'a str,
            options: &'a [String],
        ) -> BoxFuture<'a, Result<()>> {
            self.log(format!(
                "analyze {project}/{snapshot} profile={profile_id} options={options:?}"
            ));
            Box::pin(async move { Ok(()) })
        }

        fn get_output<'a>(
            &'a self,
            _user: &'a str,
            project: &'a str,
            snapshot: &'a str,
            _config: &'a str,
            run_id: &'a str,
            output_id: &'a str,
            page: &'a OutputPage,
        ) -> BoxFuture<'a, Result<Value>> {
            self.log(format!(
                "get_output {project}/{snapshot} run={run_id} output={output_id} \
                 start={} count={} app_only={}",
                page.start, page.count, page.app_only
            ));
            Box::pin(async move { Ok(self.output.clone()) })
        }

        fn get_symbols<'a>(
            &'a self,
            _user: &'a str,
            project: &'a str,
            _snapshot: &'a str,
            _config: &'a str,
            file: &'a str,
            line: &'a str,
        ) -> BoxFuture<'a, Result<Value>> {
            self.log(format!("get_symbols {project} {file}:{line}"));
            Box::pin(async move { Ok(self.symbols.clone()) })
        }
    }

    #[derive(Debug, Default)]
    struct RecordingObserver {
        events: Vec<String>,
    }

    impl SyncObserver for RecordingObserver {
        fn tree_replaced(&mut self) {
            self.events.push("tree_replaced".into());
        }
        fn expand_all(&mut self) {
            self.events.push("expand_all".into());
        }
        fn select_path(&mut self, path: &[String]) {
            self.events.push(format!("select {}", path.join("/")));
        }
        fn notice(&mut self, message: &str) {
            self.events.push(format!("notice {message}"));
        }
    }

    fn credentials() -> Config {
        Config {
            user: "alice".into(),
            token: "t".into(),
            ..Config::default()
        }
    }

    fn taint_profile() -> Value {
        json!({
            "displayName": "Taint",
            "id": "prof-1",
            "options": [
                {"id": "mode", "name": "Mode", "validValues": ["fast", "full"]}
            ],
            "outputs": [
                {"id": "o1", "attributes": [
                    {"id": "f", "displayName": "File"},
                    {"id": "l", "displayName": "Line"}
                ]}
            ]
        })
    }

    /// A server with two projects; proj1 has one snapshot carrying a
    /// configured "Taint" analysis run.
    fn populated_remote() -> MockRemote {
        MockRemote {
            projects: json!({"results": [{"name": "proj2"}, {"name": "proj1"}]}),
            catalogs: HashMap::from([(
                "proj1".to_string(),
                json!({"results": [taint_profile()]}),
            )]),
            snapshots: HashMap::from([(
                "proj1".to_string(),
                json!({"results": [{"displayName": "snap1"}]}),
            )]),
            configurations: HashMap::from([(
                ("proj1".to_string(), "snap1".to_string()),
                json!({"analyses": [
                    {"displayName": "Taint", "id": "42", "profile": "prof-1"}
                ]}),
            )]),
            output: json!({"results": [
                {"f": "A.java", "l": "17"},
                {"f": "B.java"}
            ]}),
            ..MockRemote::default()
        }
    }

    #[tokio::test]
    async fn full_sync_sorts_projects_and_populates_the_registry() {
        let mut session = Session::new(credentials());
        let remote = populated_remote();

        let report = full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap();

        let projects: Vec<_> = session
            .tree
            .projects()
            .iter()
            .map(|p| p.label().to_string())
            .collect();
        assert_eq!(projects, vec!["proj1", "proj2"]);
        assert!(session.tree.find_by_path(&["proj1", "snap1", "Taint"]).is_some());

        let info = session.registry.lookup("proj1", "snap1", "Taint");
        assert_eq!(info.profile_id.as_deref(), Some("prof-1"));
        assert_eq!(info.run_id.as_deref(), Some("42"));
        assert_eq!(session.registry.profile_for_type("Taint"), Some("prof-1"));
        assert!(session.registry.descriptor("prof-1").is_some());

        assert_eq!(report.projects, 2);
        assert_eq!(report.snapshots, 1);
        assert_eq!(report.analyses, 1);
    }

    #[tokio::test]
    async fn full_sync_emits_hints_and_reselects_the_current_project() {
        let mut config = credentials();
        config.project_name = Some("proj1".into());
        let mut session = Session::new(config);
        let remote = populated_remote();
        let mut observer = RecordingObserver::default();

        full_sync(&mut session, &remote, &mut observer).await.unwrap();

        assert_eq!(
            observer.events,
            vec!["tree_replaced", "expand_all", "select proj1"]
        );
    }

    #[tokio::test]
    async fn full_sync_fails_fast_without_credentials() {
        let mut session = Session::new(Config::default());
        let remote = populated_remote();

        let err = full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No user"), "{err:#}");
        assert!(remote.calls().is_empty(), "no network call may be attempted");
    }

    #[tokio::test]
    async fn overlapping_sync_is_rejected_without_touching_the_tree() {
        let mut session = Session::new(credentials());
        session.tree.upsert_project("stale");
        assert!(session.begin_sync());

        let remote = populated_remote();
        let err = full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already in progress"), "{err:#}");
        assert!(remote.calls().is_empty());
        assert_eq!(session.tree.projects().len(), 1);

        // The earlier sync finishing releases the guard.
        session.end_sync();
        assert!(full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn one_snapshot_failure_does_not_abort_siblings() {
        let mut remote = populated_remote();
        remote.snapshots.insert(
            "proj1".to_string(),
            json!({"results": [{"displayName": "bad"}, {"displayName": "snap1"}]}),
        );
        remote
            .failing_configurations
            .insert(("proj1".to_string(), "bad".to_string()));

        let mut session = Session::new(credentials());
        let report = full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap();

        // Both snapshot nodes exist; only the healthy one got analyses.
        assert!(session.tree.find_by_path(&["proj1", "bad"]).is_some());
        assert!(session.tree.find_by_path(&["proj1", "snap1", "Taint"]).is_some());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.analyses, 1);
    }

    #[tokio::test]
    async fn refresh_dataset_issues_exactly_one_output_call_with_cached_ids() {
        let mut session = Session::new(credentials());
        let remote = populated_remote();
        full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap();

        let page = OutputPage {
            start: 5,
            count: 10,
            app_only: true,
        };
        let table = refresh_dataset(
            &session,
            &remote,
            &Selection::new("proj1", "snap1", "Taint"),
            "o1",
            &page,
        )
        .await
        .unwrap();

        assert_eq!(table.columns, vec!["File", "Line"]);
        assert_eq!(
            table.rows,
            vec![vec!["A.java", "17"], vec!["B.java", ""]]
        );
        assert_eq!(
            remote.output_calls(),
            vec!["get_output proj1/snap1 run=42 output=o1 start=5 count=10 app_only=true"]
        );
    }

    #[tokio::test]
    async fn refresh_dataset_is_silently_empty_on_cache_misses() {
        let mut session = Session::new(credentials());
        let remote = populated_remote();
        full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap();

        // Unknown triple: no cached metadata.
        let table = refresh_dataset(
            &session,
            &remote,
            &Selection::new("proj1", "snap1", "Escape"),
            "o1",
            &OutputPage::default(),
        )
        .await
        .unwrap();
        assert_eq!(table, TableData::default());

        // Known triple, unknown output id.
        let table = refresh_dataset(
            &session,
            &remote,
            &Selection::new("proj1", "snap1", "Taint"),
            "missing",
            &OutputPage::default(),
        )
        .await
        .unwrap();
        assert_eq!(table, TableData::default());

        assert!(remote.output_calls().is_empty(), "no output query expected");
    }

    #[tokio::test]
    async fn refresh_dataset_reports_missing_selection_as_a_user_error() {
        let session = Session::new(credentials());
        let remote = populated_remote();
        let partial = Selection {
            project: Some("proj1".into()),
            snapshot: None,
            analysis: None,
        };

        let err = refresh_dataset(&session, &remote, &partial, "o1", &OutputPage::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Select a project"), "{err:#}");
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn start_analysis_sends_the_serialized_form() {
        let mut session = Session::new(credentials());
        let remote = populated_remote();
        full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap();
        session.set_selection(&Selection::new("proj1", "snap1", "Taint"));

        let mut form = analysis_form(&session, "Taint").unwrap();
        assert!(form.select("mode", "full"));
        start_analysis(&session, &remote, "Taint", &form)
            .await
            .unwrap();

        let analyze_calls: Vec<_> = remote
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("analyze"))
            .collect();
        assert_eq!(
            analyze_calls,
            vec![r#"analyze proj1/snap1 profile=prof-1 options=["mode=full"]"#]
        );
    }

    #[tokio::test]
    async fn start_analysis_short_circuits_without_a_selection() {
        let mut session = Session::new(credentials());
        let remote = populated_remote();
        full_sync(&mut session, &remote, &mut NullObserver)
            .await
            .unwrap();
        session.config.project_name = None;
        session.config.snapshot_name = None;

        let form = analysis_form(&session, "Taint").unwrap();
        let before = remote.calls().len();
        let err = start_analysis(&session, &remote, "Taint", &form)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No project selected"), "{err:#}");
        assert_eq!(remote.calls().len(), before);
    }

    #[tokio::test]
    async fn lookup_line_maps_symbol_records() {
        let mut session = Session::new(credentials());
        session.set_selection(&Selection::new("proj1", "snap1", "Taint"));
        let remote = MockRemote {
            symbols: json!({"results": [
                {"symbolId": "m1", "resultType": "method", "message": "entry point"},
                {"analysisId": "a1", "resultType": "warning", "message": "tainted"}
            ]}),
            ..MockRemote::default()
        };

        let results = lookup_line(&session, &remote, "src/A.java", 17).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symbol_id, "m1");
        assert_eq!(results[1].symbol_id, "Analysis result");
        assert_eq!(remote.calls(), vec!["get_symbols proj1 src/A.java:17"]);
    }
}
