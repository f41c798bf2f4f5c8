//! The presentation model built for one resolved record.

use fhir::{Bundle, Entry, Identity};
use medview_types::DisplayText;

use crate::models;
use crate::options::ModelOptions;
use crate::value::{ModelValue, RenderKind};

/// The model constructors a mapping can name.
///
/// Dispatch works over an explicit priority list of these tags; there is no
/// structural hierarchy to break ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Patient,
    Practitioner,
    Organization,
    Encounter,
    Composition,
    Observation,
}

impl ModelKind {
    /// Builds the model for a resolved entry.
    ///
    /// Construction is eager (all values and related-record resolutions
    /// happen here) and total: whatever the record is missing degrades to
    /// placeholder values.
    pub fn construct(self, entry: &Entry, bundle: &Bundle, options: &ModelOptions) -> RecordModel {
        match self {
            ModelKind::Patient => models::patient::build(entry, bundle, options),
            ModelKind::Practitioner => models::practitioner::build(entry, bundle, options),
            ModelKind::Organization => models::organization::build(entry, bundle, options),
            ModelKind::Encounter => models::encounter::build(entry, bundle, options),
            ModelKind::Composition => models::composition::build(entry, bundle, options),
            ModelKind::Observation => models::observation::build(entry, bundle, options),
        }
    }

    /// Display name used when a model has no headline of its own.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Patient => "Patient/in",
            ModelKind::Practitioner => "Behandelnde Person",
            ModelKind::Organization => "Einrichtung",
            ModelKind::Encounter => "Untersuchung",
            ModelKind::Composition => "Dokument",
            ModelKind::Observation => "Beobachtung",
        }
    }
}

/// A constructed, immutable view model for one record.
///
/// Lifecycle is construct → read → discard: a model is rebuilt, never
/// mutated, when its source record or options change. Models hold computed
/// display state only; they do not keep the bundle alive.
#[derive(Clone, Debug)]
pub struct RecordModel {
    kind: ModelKind,
    identity: Identity,
    headline: Option<String>,
    values: Vec<ModelValue>,
    sub_models: Vec<RecordModel>,
}

impl RecordModel {
    pub(crate) fn new(
        kind: ModelKind,
        identity: Identity,
        headline: Option<String>,
        values: Vec<ModelValue>,
        sub_models: Vec<RecordModel>,
    ) -> Self {
        Self {
            kind,
            identity,
            headline,
            values,
            sub_models,
        }
    }

    /// Which constructor built this model.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Identity of the record this model presents.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The headline, unless construction suppressed it.
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    /// The ordered value list both projections share.
    pub fn values(&self) -> &[ModelValue] {
        &self.values
    }

    /// Nested models constructed for inline detail.
    pub fn sub_models(&self) -> &[RecordModel] {
        &self.sub_models
    }

    /// The record's single-line summary.
    ///
    /// Total by contract: label and value are always present, falling back
    /// to the constructor's display name and "-". Derives from state computed
    /// at construction; nothing is re-resolved here. Navigation targets the
    /// record itself.
    pub fn main_value(&self) -> ModelValue {
        let label = self
            .headline
            .clone()
            .unwrap_or_else(|| self.kind.display_name().to_owned());

        let summary = self
            .values
            .iter()
            .find(|value| value.render_as == RenderKind::Date && !value.value.is_missing())
            .or_else(|| self.values.iter().find(|value| !value.value.is_missing()));

        ModelValue {
            label,
            value: summary
                .map(|value| value.value.clone())
                .unwrap_or_else(DisplayText::missing),
            target: Some(self.identity.clone()),
            sub_entry: None,
            sub_models: Vec::new(),
            render_as: RenderKind::Text,
            sort_by: summary.and_then(|value| value.sort_by.clone()),
        }
    }
}
