//! Interprets an "outputs" schema entry as a tabular dataset layout and
//! extracts rows from paginated result records.

use serde_json::{Map, Value};

/// Column layout resolved from one output schema entry: display names and
/// the attribute ids backing them, as parallel lists in schema-declared
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub columns: Vec<String>,
    pub attribute_ids: Vec<String>,
}

impl ResolvedColumns {
    pub fn is_empty(&self) -> bool {
        self.attribute_ids.is_empty()
    }
}

/// Look up `output_id` in the profile's `outputs` list and resolve its
/// column layout.
///
/// An unknown output id resolves to the empty layout: the caller shows an
/// empty table, it does not fail. Attributes need both `id` and
/// `displayName`; column order reflects server intent (e.g. "file",
/// "line", "message") and is never alphabetized.
pub fn resolve_columns(profile: &Value, output_id: &str) -> ResolvedColumns {
    let mut resolved = ResolvedColumns::default();
    let Some(outputs) = profile.get("outputs").and_then(Value::as_array) else {
        return resolved;
    };
    let Some(output) = outputs
        .iter()
        .find(|o| o.get("id").and_then(Value::as_str) == Some(output_id))
    else {
        return resolved;
    };
    let Some(attributes) = output.get("attributes").and_then(Value::as_array) else {
        return resolved;
    };
    for attribute in attributes.iter().filter_map(Value::as_object) {
        let id = attribute.get("id").and_then(Value::as_str);
        let display_name = attribute.get("displayName").and_then(Value::as_str);
        if let (Some(id), Some(display_name)) = (id, display_name) {
            resolved.attribute_ids.push(id.to_string());
            resolved.columns.push(display_name.to_string());
        }
    }
    resolved
}

/// The output ids declared by a profile, sorted ascending. Drives the
/// dataset picker.
pub fn output_ids(profile: &Value) -> Vec<String> {
    let mut ids: Vec<String> = profile
        .get("outputs")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|o| o.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    ids.sort();
    ids
}

/// Extract one table row from a flat result record.
///
/// A missing attribute value yields an intentionally blank cell rather
/// than aborting the row; partial records are expected since attributes
/// may be optional.
pub fn extract_row(record: &Map<String, Value>, attribute_ids: &[String]) -> Vec<String> {
    attribute_ids
        .iter()
        .map(|id| cell(record.get(id)))
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
