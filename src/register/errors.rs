//! Field error tree shared by client-side validation and server responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name the API uses for errors not tied to a single field
const NON_FIELD_ERRORS: &str = "nonFieldErrors";

/// Error attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Message(String),
    Nested(ErrorTree),
}

/// Per-field errors of a form, nested for sub-forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    fields: BTreeMap<String, FieldError>,
    internal: Option<String>,
}

impl ErrorTree {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.internal.is_none()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .insert(field.into(), FieldError::Message(message.into()));
    }

    /// Attach a sub-form's errors; an empty tree is not stored
    pub fn insert_nested(&mut self, field: impl Into<String>, tree: ErrorTree) {
        if !tree.is_empty() {
            self.fields.insert(field.into(), FieldError::Nested(tree));
        }
    }

    /// Message for a leaf field. For a sub-form, its form-level message.
    pub fn message(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            FieldError::Message(m) => Some(m),
            FieldError::Nested(tree) => tree.internal(),
        }
    }

    pub fn nested(&self, field: &str) -> Option<&ErrorTree> {
        match self.fields.get(field)? {
            FieldError::Nested(tree) => Some(tree),
            FieldError::Message(_) => None,
        }
    }

    pub fn nested_mut(&mut self, field: &str) -> Option<&mut ErrorTree> {
        match self.fields.get_mut(field)? {
            FieldError::Nested(tree) => Some(tree),
            FieldError::Message(_) => None,
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.fields.remove(field)
    }

    /// Keep only the fields for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.fields.retain(|name, _| keep(name));
    }

    /// Form-level message (non-field errors)
    pub fn internal(&self) -> Option<&str> {
        self.internal.as_deref()
    }

    pub fn set_internal(&mut self, message: impl Into<String>) {
        self.internal = Some(message.into());
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Build a tree from the structured errors of a failed mutation
    pub fn from_server(errors: &[ObjectError]) -> Self {
        let mut tree = Self::default();
        for error in errors {
            if error.field == NON_FIELD_ERRORS {
                if let Some(messages) = &error.messages {
                    tree.set_internal(messages.clone());
                }
                continue;
            }

            match error.object_errors.as_deref() {
                Some(children) if !children.is_empty() => {
                    let mut nested = Self::from_server(children);
                    if let Some(messages) = &error.messages {
                        nested.set_internal(messages.clone());
                    }
                    tree.insert_nested(error.field.clone(), nested);
                }
                _ => {
                    if let Some(messages) = &error.messages {
                        tree.insert(error.field.clone(), messages.clone());
                    }
                }
            }
        }
        tree
    }

    /// One line per error, nested fields as `group.field`
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        self.collect_lines("", &mut lines);
        lines.join("\n")
    }

    fn collect_lines(&self, prefix: &str, lines: &mut Vec<String>) {
        if let Some(internal) = &self.internal {
            if prefix.is_empty() {
                lines.push(internal.clone());
            } else {
                lines.push(format!("{prefix}: {internal}"));
            }
        }
        for (name, error) in &self.fields {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match error {
                FieldError::Message(m) => lines.push(format!("{path}: {m}")),
                FieldError::Nested(tree) => tree.collect_lines(&path, lines),
            }
        }
    }
}

/// Structured error returned by a mutation with `ok: false`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectError {
    pub field: String,
    #[serde(default)]
    pub messages: Option<String>,
    #[serde(default)]
    pub object_errors: Option<Vec<ObjectError>>,
    #[serde(default)]
    pub client_id: Option<String>,
}
