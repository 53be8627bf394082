//! Interprets an "options" schema as an editable form and serializes the
//! edited values back to a flat `key=value` option list.
//!
//! A profile schema may contain entries this client does not understand;
//! those are reported as warnings and skipped, never treated as fatal.

use serde_json::Value;

/// How a single option is edited, resolved once per schema entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// One choice from an enumerated set. The server-declared choice order
    /// is preserved, not re-sorted.
    SingleSelect {
        choices: Vec<String>,
        selected: Option<String>,
    },
    /// Any subset of an enumerated set; serialized as repeated keys.
    MultiSelect {
        choices: Vec<String>,
        selected: Vec<String>,
    },
    /// A boolean toggle.
    Toggle { on: bool },
    /// Free-form text.
    Text { value: String },
}

/// One editable field of an analysis option form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub name: String,
    pub state: FieldState,
}

/// The editable value set built from an options schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    pub fields: Vec<FormField>,
    /// Schema entries that were skipped, with the reason.
    pub warnings: Vec<String>,
}

impl FormModel {
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Replace a text field's value. Returns false when the field is
    /// absent or of another kind.
    pub fn set_text(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.field_mut(id) {
            Some(FormField {
                state: FieldState::Text { value: current },
                ..
            }) => {
                *current = value.into();
                true
            }
            _ => false,
        }
    }

    /// Flip a toggle field to `on`.
    pub fn set_toggle(&mut self, id: &str, on: bool) -> bool {
        match self.field_mut(id) {
            Some(FormField {
                state: FieldState::Toggle { on: current },
                ..
            }) => {
                *current = on;
                true
            }
            _ => false,
        }
    }

    /// Pick one of a single-select field's choices. A value outside the
    /// enumerated set is rejected.
    pub fn select(&mut self, id: &str, choice: &str) -> bool {
        match self.field_mut(id) {
            Some(FormField {
                state: FieldState::SingleSelect { choices, selected },
                ..
            }) if choices.iter().any(|c| c == choice) => {
                *selected = Some(choice.to_string());
                true
            }
            _ => false,
        }
    }

    /// Replace a multi-select field's selection. Selection order is kept
    /// as given; values outside the enumerated set are dropped.
    pub fn set_selections(&mut self, id: &str, values: Vec<String>) -> bool {
        match self.field_mut(id) {
            Some(FormField {
                state: FieldState::MultiSelect { choices, selected },
                ..
            }) => {
                *selected = values
                    .into_iter()
                    .filter(|v| choices.iter().any(|c| c == v))
                    .collect();
                true
            }
            _ => false,
        }
    }

    /// Apply one raw `value` to the field `id`, whatever its kind: text is
    /// replaced, toggles parse `"true"`, selects validate against their
    /// choices, multi-selects accumulate. Convenience for flag-style
    /// callers.
    pub fn apply_option(&mut self, id: &str, value: &str) -> bool {
        match self.field_mut(id) {
            Some(field) => match &mut field.state {
                FieldState::Text { value: current } => {
                    *current = value.to_string();
                    true
                }
                FieldState::Toggle { on } => {
                    *on = value == "true";
                    true
                }
                FieldState::SingleSelect { choices, selected } => {
                    if choices.iter().any(|c| c == value) {
                        *selected = Some(value.to_string());
                        true
                    } else {
                        false
                    }
                }
                FieldState::MultiSelect { choices, selected } => {
                    if choices.iter().any(|c| c == value) {
                        if !selected.iter().any(|s| s == value) {
                            selected.push(value.to_string());
                        }
                        true
                    } else {
                        false
                    }
                }
            },
            None => false,
        }
    }

    /// Serialize the form to an ordered list of `"<id>=<value>"` options.
    ///
    /// Multi-select fields emit one entry per selected value, in selection
    /// order, so the wire format supports repeated keys. A single-select
    /// with nothing selected emits nothing.
    pub fn serialize(&self) -> Vec<String> {
        let mut options = Vec::new();
        for field in &self.fields {
            match &field.state {
                FieldState::SingleSelect { selected, .. } => {
                    if let Some(value) = selected {
                        options.push(format!("{}={}", field.id, value));
                    }
                }
                FieldState::MultiSelect { selected, .. } => {
                    for value in selected {
                        options.push(format!("{}={}", field.id, value));
                    }
                }
                FieldState::Toggle { on } => options.push(format!("{}={}", field.id, on)),
                FieldState::Text { value } => options.push(format!("{}={}", field.id, value)),
            }
        }
        options
    }
}

/// Build the form for a profile's `options` schema entries.
///
/// The field kind is decided once per entry: enumerated values make a
/// single- or multi-select, otherwise `isBoolean` makes a toggle and
/// anything else a free-text input. Defaults come from `defaultValue`.
pub fn build_form(options: &[Value]) -> FormModel {
    let mut model = FormModel::default();
    for option in options {
        match build_field(option) {
            Ok(field) => model.fields.push(field),
            Err(reason) => {
                tracing::warn!(%option, reason, "ignoring option schema entry");
                model.warnings.push(reason);
            }
        }
    }
    model
}

fn build_field(option: &Value) -> Result<FormField, String> {
    let entry = option
        .as_object()
        .ok_or_else(|| "option entry is not an object".to_string())?;
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| "option entry has no name".to_string())?;
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("option '{name}' has no id"))?;

    let default = entry.get("defaultValue").and_then(Value::as_str);
    let choices: Vec<String> = entry
        .get("validValues")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let state = if !choices.is_empty() {
        let multiple = entry
            .get("multipleValues")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if multiple {
            let selected = default
                .filter(|d| choices.iter().any(|c| c == d))
                .map(|d| vec![d.to_string()])
                .unwrap_or_default();
            FieldState::MultiSelect { choices, selected }
        } else {
            // Without a usable default the first choice is pre-selected,
            // so a serialized single-select always carries a value.
            let selected = default
                .filter(|d| choices.iter().any(|c| c == d))
                .map(str::to_string)
                .or_else(|| choices.first().cloned());
            FieldState::SingleSelect { choices, selected }
        }
    } else if entry
        .get("isBoolean")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        FieldState::Toggle {
            on: default == Some("true"),
        }
    } else {
        FieldState::Text {
            value: default.unwrap_or("").to_string(),
        }
    };

    Ok(FormField {
        id: id.to_string(),
        name: name.to_string(),
        state,
    })
}
