//! Examination finding presentation model.
//!
//! Also serves as the catch-all projection for mapped-but-constructorless
//! record kinds (see mapping dispatch): its field extraction only assumes the
//! common observation-style shape and degrades wherever that assumption
//! fails.

use fhir::{resolve, Bundle, Entry, Resource};
use medview_types::display_date;
use serde_json::Value;
use terminology::ConceptMap;

use crate::model::{ModelKind, RecordModel};
use crate::models::support;
use crate::options::ModelOptions;
use crate::profiles;
use crate::value::ModelValue;

/// Display text for the observation's result, across the value[x] forms the
/// supported records carry.
fn observation_value(resource: &Resource, maps: &[ConceptMap]) -> Option<String> {
    if let Some(quantity) = resource.field("valueQuantity") {
        let value = quantity.get("value")?;
        let number = match value {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.clone(),
            _ => return None,
        };
        let unit = quantity
            .get("unit")
            .or_else(|| quantity.get("code"))
            .and_then(Value::as_str);
        return Some(match unit {
            Some(unit) => format!("{number} {unit}"),
            None => number,
        });
    }
    if let Some(concept) = resource.field("valueCodeableConcept") {
        return support::coded_text(concept, maps);
    }
    if let Some(text) = resource.text("valueString") {
        return Some(text.to_owned());
    }
    if let Some(flag) = resource.field("valueBoolean").and_then(Value::as_bool) {
        return Some(if flag { "Ja" } else { "Nein" }.to_owned());
    }
    if let Some(datetime) = resource.text("valueDateTime") {
        return Some(display_date(datetime));
    }
    None
}

pub fn build(entry: &Entry, bundle: &Bundle, options: &ModelOptions) -> RecordModel {
    let resource = &entry.resource;

    let label = options.custom_label.clone().or_else(|| {
        resource
            .field("code")
            .and_then(|concept| support::coded_text(concept, &options.code_concept_maps))
    });

    let effective_raw = resource.text("effectiveDateTime").map(str::to_owned);
    let effective = effective_raw.as_deref().map(display_date);

    let performer = resource
        .array("performer")
        .iter()
        .filter_map(|performer| support::reference_in(entry, performer))
        .find_map(|reference| {
            resolve(
                bundle,
                &[profiles::PRACTITIONER, profiles::ORGANIZATION],
                &reference,
            )
        });
    let performer_value = match performer {
        Some(found) => {
            let display = support::human_name(&found.resource)
                .or_else(|| found.resource.text("name").map(str::to_owned));
            ModelValue::text("Dokumentiert von", display).with_target(found.full_url.clone())
        }
        None => ModelValue::text("Dokumentiert von", None),
    };

    let mut values = Vec::new();
    if !options.no_value {
        values.push(ModelValue::text(
            "Wert",
            observation_value(resource, &options.value_concept_maps),
        ));
    }
    values.push(ModelValue::date("Datum", effective, effective_raw));
    values.push(performer_value);

    RecordModel::new(
        ModelKind::Observation,
        entry.full_url.clone(),
        options.headline_for(label),
        values,
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::Identity;
    use serde_json::json;

    fn entry_for(resource: Value) -> Entry {
        Entry {
            full_url: Identity::new("urn:uuid:obs-1"),
            resource: Resource::from_json(resource),
        }
    }

    fn empty_bundle() -> Bundle {
        Bundle::new(None, Vec::new()).expect("empty bundle")
    }

    #[test]
    fn quantity_value_with_unit() {
        let entry = entry_for(json!({
            "resourceType": "Observation",
            "code": {"coding": [{"code": "57036006", "display": "Geburtsgewicht"}]},
            "valueQuantity": {"value": 3200, "unit": "g"},
            "effectiveDateTime": "2021-06-01"
        }));
        let model = build(&entry, &empty_bundle(), &ModelOptions::default());

        assert_eq!(model.headline(), Some("Geburtsgewicht"));
        assert_eq!(model.values()[0].value.as_display(), "3200 g");
        assert_eq!(model.values()[1].value.as_display(), "01.06.2021");
    }

    #[test]
    fn boolean_and_string_values() {
        let yes = entry_for(json!({"valueBoolean": true}));
        let model = build(&yes, &empty_bundle(), &ModelOptions::default());
        assert_eq!(model.values()[0].value.as_display(), "Ja");

        let text = entry_for(json!({"valueString": "unauffällig"}));
        let model = build(&text, &empty_bundle(), &ModelOptions::default());
        assert_eq!(model.values()[0].value.as_display(), "unauffällig");
    }

    #[test]
    fn custom_label_overrides_coded_headline() {
        let entry = entry_for(json!({
            "code": {"coding": [{"code": "x", "display": "Kodiert"}]}
        }));
        let options = ModelOptions {
            custom_label: Some("Apgar-Wert".to_owned()),
            ..ModelOptions::default()
        };
        let model = build(&entry, &empty_bundle(), &options);
        assert_eq!(model.headline(), Some("Apgar-Wert"));
    }

    #[test]
    fn no_value_suppresses_the_value_row() {
        let entry = entry_for(json!({"valueString": "versteckt"}));
        let options = ModelOptions {
            no_value: true,
            ..ModelOptions::default()
        };
        let model = build(&entry, &empty_bundle(), &options);
        assert!(model.values().iter().all(|value| value.label != "Wert"));
    }

    #[test]
    fn valueless_record_keeps_total_main_value() {
        let entry = entry_for(json!({"resourceType": "Observation"}));
        let model = build(&entry, &empty_bundle(), &ModelOptions::default());
        let main = model.main_value();
        assert_eq!(main.label, "Beobachtung");
        assert_eq!(main.value.as_display(), "-");
    }
}
