// SPDX-License-Identifier: MPL-2.0
//! Editable metadata fields.
//!
//! Each recognized field is one variant of a closed family behind the
//! [`FieldEditor`] capability interface, dispatched by field identifier
//! through a [`FieldRegistry`]. Fields absent from the registry are never
//! rendered or editable.

pub mod date_time;

use date_time::DateTimeEditor;
use std::collections::BTreeMap;

/// Outcome of parsing a field's raw textual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The raw value was empty.
    Missing,
    /// The raw value was non-empty but did not match the expected pattern;
    /// the original text is retained for display.
    Corrupt(String),
    /// The raw value matched and was parsed.
    Valid,
}

/// The ordered list of strings submitted from the rendered view:
/// `[field identifier, one value per editable sub-control]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePayload(Vec<String>);

impl UpdatePayload {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// The field identifier, if the payload has one.
    pub fn field_id(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The full payload including the field identifier.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Capability interface every field editor implements.
pub trait FieldEditor {
    /// Field identifier as reported by the external tool.
    fn id(&self) -> &str;

    /// The raw textual value, exactly as the tool reports or expects it.
    fn raw(&self) -> &str;

    /// Parse outcome for the raw value.
    fn classification(&self) -> Classification;

    /// Editable HTML fragment for the detail view. All file-derived text is
    /// escaped by the implementation.
    fn render_fragment(&self) -> String;

    /// Tool arguments that persist the raw value, without the target path.
    fn tool_args(&self) -> Vec<String>;
}

/// The closed set of known field implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    DateTime,
}

/// Maps field identifiers to their editor implementation.
///
/// Iteration order is the sorted order of field identifiers, which is also
/// the order rows appear in the detail view.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: BTreeMap<String, FieldKind>,
}

impl FieldRegistry {
    /// The default registry: the capture-timestamp field only.
    pub fn with_defaults() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(date_time::CAPTURE_FIELD.to_string(), FieldKind::DateTime);
        Self { fields }
    }

    /// Recognized field identifiers, sorted.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Checks whether a field identifier is recognized.
    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// Builds the editor for a recognized field from its raw value.
    pub fn editor(&self, id: &str, raw: &str) -> Option<Box<dyn FieldEditor>> {
        match self.fields.get(id)? {
            FieldKind::DateTime => Some(Box::new(DateTimeEditor::new(id, raw))),
        }
    }

    /// Builds a new editor from an update payload.
    ///
    /// Returns `None` when the field is unknown, the payload arity is wrong,
    /// or the submitted values do not parse; the caller must report a
    /// parameter error and must not invoke the external tool.
    pub fn from_update(&self, payload: &UpdatePayload) -> Option<Box<dyn FieldEditor>> {
        let id = payload.field_id()?;
        match self.fields.get(id)? {
            FieldKind::DateTime => DateTimeEditor::from_update(payload)
                .map(|editor| Box::new(editor) as Box<dyn FieldEditor>),
        }
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
