//! Model values: the label/value pairs a record presents.

use fhir::Identity;
use medview_types::DisplayText;

use crate::model::ModelKind;

/// How a value asks to be rendered.
///
/// Both projections consume the same value list; the render kind only picks
/// the representation within a projection, it never changes the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderKind {
    /// Plain text row.
    #[default]
    Text,

    /// A date row (already formatted for display; the tag lets renderers
    /// right-align or restyle dates).
    Date,

    /// Document-only nested table: the value row expands the referenced
    /// entry's sub-models beneath it when projecting a document.
    SubTable,
}

/// One labelled display value of a model.
///
/// Values are pure data shared by the interactive and the document
/// projection. Navigation is declarative: `target` names the record a host
/// should navigate to, the host binds the actual callback.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelValue {
    /// Display label.
    pub label: String,

    /// Display value; renders "-" when missing.
    pub value: DisplayText,

    /// Identity of the record this value navigates to, when navigable.
    pub target: Option<Identity>,

    /// Entry whose sub-models a document projection expands beneath this
    /// value (used with [`RenderKind::SubTable`]).
    pub sub_entry: Option<Identity>,

    /// Model constructors for the sub-table expansion.
    pub sub_models: Vec<ModelKind>,

    /// Representation hint for renderers.
    pub render_as: RenderKind,

    /// Raw sort key for caller-supplied compare functions.
    pub sort_by: Option<String>,
}

impl ModelValue {
    /// A plain value from a label and an optional raw string.
    pub fn text(label: impl Into<String>, value: Option<String>) -> Self {
        Self {
            label: label.into(),
            value: DisplayText::from(value),
            target: None,
            sub_entry: None,
            sub_models: Vec::new(),
            render_as: RenderKind::Text,
            sort_by: None,
        }
    }

    /// A date value, tagged for date rendering and keyed for sorting by the
    /// raw (unformatted) date.
    pub fn date(label: impl Into<String>, display: Option<String>, raw: Option<String>) -> Self {
        Self {
            render_as: RenderKind::Date,
            sort_by: raw,
            ..Self::text(label, display)
        }
    }

    /// Attaches a navigation target.
    pub fn with_target(mut self, target: Identity) -> Self {
        self.target = Some(target);
        self
    }

    /// Marks the value as a document sub-table over the given entry.
    pub fn with_sub_table(mut self, entry: Identity, sub_models: Vec<ModelKind>) -> Self {
        self.sub_entry = Some(entry);
        self.sub_models = sub_models;
        self.render_as = RenderKind::SubTable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_value_defaults() {
        let value = ModelValue::text("Name", Some("Max Mustermann".to_owned()));
        assert_eq!(value.label, "Name");
        assert_eq!(value.value.as_display(), "Max Mustermann");
        assert!(value.target.is_none());
        assert_eq!(value.render_as, RenderKind::Text);
    }

    #[test]
    fn missing_value_renders_placeholder() {
        let value = ModelValue::text("Name", None);
        assert_eq!(value.value.as_display(), "-");
    }

    #[test]
    fn date_value_keeps_raw_sort_key() {
        let value = ModelValue::date(
            "Datum",
            Some("01.06.2021".to_owned()),
            Some("2021-06-01".to_owned()),
        );
        assert_eq!(value.render_as, RenderKind::Date);
        assert_eq!(value.sort_by.as_deref(), Some("2021-06-01"));
    }

    #[test]
    fn sub_table_value_carries_constructors() {
        let value = ModelValue::text("Durchgeführt von", Some("Dr. Weber".to_owned()))
            .with_sub_table(Identity::new("urn:uuid:prac-1"), vec![ModelKind::Practitioner]);
        assert_eq!(value.render_as, RenderKind::SubTable);
        assert_eq!(value.sub_models, vec![ModelKind::Practitioner]);
    }
}
