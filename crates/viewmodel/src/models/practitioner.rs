//! Practitioner presentation model.

use fhir::{Bundle, Entry, Resource};
use terminology::ConceptMap;

use crate::model::{ModelKind, RecordModel};
use crate::models::support;
use crate::options::ModelOptions;
use crate::value::ModelValue;

/// Translated speciality from the `qualification` list, entries joined with
/// ", ". Shared with the composition author labels.
pub(crate) fn speciality(resource: &Resource, maps: &[ConceptMap]) -> Option<String> {
    let qualifications: Vec<String> = resource
        .array("qualification")
        .iter()
        .filter_map(|qualification| qualification.get("code"))
        .filter_map(|code| support::coded_text(code, maps))
        .collect();

    if qualifications.is_empty() {
        None
    } else {
        Some(qualifications.join(", "))
    }
}

pub fn build(entry: &Entry, _bundle: &Bundle, options: &ModelOptions) -> RecordModel {
    let resource = &entry.resource;

    let name = support::human_name(resource);
    let speciality = speciality(resource, &options.value_concept_maps);

    let values = vec![
        ModelValue::text("Name", name.clone()),
        ModelValue::text("Fachrichtung", speciality),
    ];

    RecordModel::new(
        ModelKind::Practitioner,
        entry.full_url.clone(),
        options.headline_for(name),
        values,
        Vec::new(),
    )
}
