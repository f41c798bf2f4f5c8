//! Interactive list projection.
//!
//! Produces navigable items for the record browser. Navigation stays
//! declarative: an item or value carries the identity of the record it leads
//! to and the host binds the actual callback, which makes repeated
//! activation naturally idempotent (navigating twice navigates twice).

use medview_model::{DispatchOutcome, ModelValue, RecordModel, SectionView};
use medview_types::DisplayText;
use serde::Serialize;

use fhir::Identity;

/// One labelled row of a list item.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListValue {
    pub label: String,
    pub value: DisplayText,

    /// Record this row navigates to, when navigable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Identity>,
}

impl From<&ModelValue> for ListValue {
    fn from(value: &ModelValue) -> Self {
        Self {
            label: value.label.clone(),
            value: value.value.clone(),
            target: value.target.clone(),
        }
    }
}

/// A navigable list item for one model.
#[derive(Clone, Debug, Serialize)]
pub struct ListItem {
    /// Record the item presents (and navigates to).
    pub identity: Identity,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    /// Single-line summary row.
    pub summary: ListValue,

    /// All rows, in model value order.
    pub values: Vec<ListValue>,

    /// Items for nested sub-models.
    pub children: Vec<ListItem>,
}

/// A titled group of list items.
#[derive(Clone, Debug, Serialize)]
pub struct ListSection {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    pub items: Vec<ListItem>,

    /// Descriptive, recoverable messages for entries the mapping table does
    /// not support. Hosts show these with a way back; they are not items.
    pub notices: Vec<String>,
}

/// Projects one constructed model into a list item.
pub fn project_model(model: &RecordModel) -> ListItem {
    ListItem {
        identity: model.identity().clone(),
        headline: model.headline().map(str::to_owned),
        summary: ListValue::from(&model.main_value()),
        values: model.values().iter().map(ListValue::from).collect(),
        children: model.sub_models().iter().map(project_model).collect(),
    }
}

/// Projects section views into list sections.
pub fn project_sections(sections: &[SectionView]) -> Vec<ListSection> {
    sections
        .iter()
        .map(|section| {
            let mut items = Vec::new();
            let mut notices = Vec::new();
            for entry in &section.entries {
                match &entry.outcome {
                    DispatchOutcome::Matched { models, .. } => {
                        items.extend(models.iter().map(project_model));
                    }
                    DispatchOutcome::Unsupported { profile_hint } => {
                        notices.push(format!("Nicht unterstütztes Dokument: {profile_hint}"));
                    }
                }
            }
            ListSection {
                title: section.title.clone(),
                hint: section.hint.clone(),
                items,
                notices,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::{Bundle, Entry, Resource};
    use medview_model::{standard_table, EntryView};
    use serde_json::json;

    fn patient_model() -> RecordModel {
        let bundle = Bundle::new(
            None,
            vec![Entry {
                full_url: Identity::new("urn:uuid:patient-1"),
                resource: Resource::from_json(json!({
                    "resourceType": "Patient",
                    "name": [{"family": "Mustermann", "given": ["Max"]}],
                    "birthDate": "2021-06-01"
                })),
            }],
        )
        .expect("unique identities");
        let entry = bundle.entry_by_identity("urn:uuid:patient-1").expect("patient");
        match standard_table().dispatch(&bundle, entry) {
            DispatchOutcome::Matched { mut models, .. } => models.remove(0),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn item_mirrors_model_values_in_order() {
        let model = patient_model();
        let item = project_model(&model);

        assert_eq!(item.values.len(), model.values().len());
        for (row, value) in item.values.iter().zip(model.values()) {
            assert_eq!(row.label, value.label);
            assert_eq!(row.value, value.value);
        }
        assert_eq!(item.identity.as_str(), "urn:uuid:patient-1");
    }

    #[test]
    fn summary_is_the_main_value() {
        let model = patient_model();
        let item = project_model(&model);
        assert_eq!(item.summary.label, "Max Mustermann");
        assert_eq!(
            item.summary.target.as_ref().map(Identity::as_str),
            Some("urn:uuid:patient-1")
        );
    }

    #[test]
    fn unsupported_entries_become_notices_not_items() {
        let section = SectionView {
            title: "Untersuchung".to_owned(),
            hint: None,
            entries: vec![EntryView {
                identity: Identity::new("urn:uuid:x"),
                outcome: DispatchOutcome::Unsupported {
                    profile_hint: "https://fhir.example.de/StructureDefinition/Medication"
                        .to_owned(),
                },
            }],
        };
        let sections = project_sections(&[section]);
        assert!(sections[0].items.is_empty());
        assert_eq!(sections[0].notices.len(), 1);
        assert!(sections[0].notices[0].contains("Medication"));
    }
}
