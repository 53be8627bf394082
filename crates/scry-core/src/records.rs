//! Boundary parsing of untyped server records.
//!
//! Server responses are externally controlled and never treated as
//! trusted, well-formed input: every accessor here downgrades a bad shape
//! to "skip" instead of failing the caller.

use serde_json::{Map, Value};

/// Iterate over the flat records under a response's top-level `results`
/// field. Every "list"-shaped response uses this convention; entries that
/// are not objects are skipped.
pub fn results(response: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    response
        .get("results")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn string_field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// One record of a `list_projects` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
}

impl ProjectRecord {
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            name: string_field(record, "name")?.to_string(),
        })
    }
}

/// One record of a `list_snapshots` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub display_name: String,
}

impl SnapshotRecord {
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            display_name: string_field(record, "displayName")?.to_string(),
        })
    }
}

/// One record of a project's analysis-type catalog
/// (`get_project_analyses`); `id` is the profile id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTypeRecord {
    pub display_name: String,
    pub profile_id: Option<String>,
}

impl AnalysisTypeRecord {
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            display_name: string_field(record, "displayName")?.to_string(),
            profile_id: string_field(record, "id").map(str::to_string),
        })
    }
}

/// One `analyses` entry of a snapshot configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredAnalysis {
    pub display_name: String,
    /// Low-level run id, when the analysis has already run.
    pub id: Option<String>,
    pub profile: Option<String>,
}

/// The configured analyses of a snapshot's configuration document.
/// Entries without a `displayName` are skipped.
pub fn configured_analyses(configuration: &Value) -> Vec<ConfiguredAnalysis> {
    let Some(entries) = configuration.get("analyses").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            Some(ConfiguredAnalysis {
                display_name: string_field(entry, "displayName")?.to_string(),
                id: string_field(entry, "id").map(str::to_string),
                profile: string_field(entry, "profile").map(str::to_string),
            })
        })
        .collect()
}

/// An analysis result for a specific source line (`get_symbols`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    pub symbol_id: String,
    pub kind: String,
    pub description: String,
}

impl LineResult {
    /// A record without a `symbolId` but with an `analysisId` is a plain
    /// analysis result; anything else falls back to empty fields.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let symbol_id = match string_field(record, "symbolId") {
            Some(id) => id.to_string(),
            None if record.contains_key("analysisId") => "Analysis result".to_string(),
            None => String::new(),
        };
        Some(Self {
            symbol_id,
            kind: string_field(record, "resultType").unwrap_or("").to_string(),
            description: string_field(record, "message").unwrap_or("").to_string(),
        })
    }
}
