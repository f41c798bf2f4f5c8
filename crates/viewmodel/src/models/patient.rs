//! Patient presentation model.

use fhir::{Bundle, Entry};
use medview_types::display_date;
use terminology::translate;

use crate::model::{ModelKind, RecordModel};
use crate::models::support;
use crate::options::ModelOptions;
use crate::value::ModelValue;

/// Identifier system of the insured-person number.
const KVNR_SYSTEM: &str = "http://fhir.de/sid/gkv/kvid-10";

pub fn build(entry: &Entry, _bundle: &Bundle, options: &ModelOptions) -> RecordModel {
    let resource = &entry.resource;

    let name = support::human_name(resource);
    let birth_raw = resource.text("birthDate").map(str::to_owned);
    let birth = birth_raw.as_deref().map(display_date);
    let gender = resource
        .text("gender")
        .map(|code| translate(code, None, &options.value_concept_maps));
    let kvnr = support::identifier_value(resource, KVNR_SYSTEM).map(str::to_owned);

    let values = vec![
        ModelValue::text("Name", name.clone()),
        ModelValue::date("Geburtsdatum", birth, birth_raw),
        ModelValue::text("Geschlecht", gender),
        ModelValue::text("Versichertennummer", kvnr),
    ];

    RecordModel::new(
        ModelKind::Patient,
        entry.full_url.clone(),
        options.headline_for(name),
        values,
        Vec::new(),
    )
}
