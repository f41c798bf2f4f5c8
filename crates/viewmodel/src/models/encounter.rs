//! Examination visit presentation model.

use fhir::{resolve, Bundle, Entry};
use medview_types::display_date;

use crate::model::{ModelKind, RecordModel};
use crate::models::support;
use crate::options::ModelOptions;
use crate::profiles;
use crate::value::ModelValue;

pub fn build(entry: &Entry, bundle: &Bundle, options: &ModelOptions) -> RecordModel {
    let resource = &entry.resource;

    let kind = resource
        .array("type")
        .first()
        .and_then(|concept| support::coded_text(concept, &options.code_concept_maps));

    let start_raw = resource.path_text("period.start").map(str::to_owned);
    let start = start_raw.as_deref().map(display_date);

    // Performing practitioner: resolved at construction; in the document the
    // row expands into a nested practitioner table.
    let performer = resource
        .array("participant")
        .iter()
        .filter_map(|participant| participant.get("individual"))
        .filter_map(|individual| support::reference_in(entry, individual))
        .find_map(|reference| resolve(bundle, &[profiles::PRACTITIONER], &reference));
    let performer_value = match performer {
        Some(found) => ModelValue::text(
            "Durchgeführt von",
            support::human_name(&found.resource),
        )
        .with_target(found.full_url.clone())
        .with_sub_table(found.full_url.clone(), vec![ModelKind::Practitioner]),
        None => ModelValue::text("Durchgeführt von", None),
    };

    let provider = support::field_reference(entry, "serviceProvider")
        .and_then(|reference| resolve(bundle, &[profiles::ORGANIZATION], &reference));
    let provider_value = match provider {
        Some(found) => ModelValue::text(
            "Einrichtung",
            found.resource.text("name").map(str::to_owned),
        )
        .with_target(found.full_url.clone()),
        None => ModelValue::text("Einrichtung", None),
    };

    let values = vec![
        ModelValue::date("Untersucht am", start, start_raw),
        performer_value,
        provider_value,
    ];

    RecordModel::new(
        ModelKind::Encounter,
        entry.full_url.clone(),
        options.headline_for(kind),
        values,
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::{Identity, Resource};
    use serde_json::json;

    fn sample_bundle() -> Bundle {
        Bundle::new(
            None,
            vec![
                Entry {
                    full_url: Identity::new("urn:uuid:enc-1"),
                    resource: Resource::from_json(json!({
                        "resourceType": "Encounter",
                        "type": [{"coding": [{"code": "U1"}]}],
                        "period": {"start": "2021-06-01T12:00:00+02:00"},
                        "participant": [{"individual": {"reference": "urn:uuid:prac-1"}}],
                        "serviceProvider": {"reference": "urn:uuid:org-1"}
                    })),
                },
                Entry {
                    full_url: Identity::new("urn:uuid:prac-1"),
                    resource: Resource::from_json(json!({
                        "resourceType": "Practitioner",
                        "name": [{"family": "Weber", "given": ["Ines"]}]
                    })),
                },
                Entry {
                    full_url: Identity::new("urn:uuid:org-1"),
                    resource: Resource::from_json(json!({
                        "resourceType": "Organization",
                        "name": "Geburtsklinik Mitte"
                    })),
                },
            ],
        )
        .expect("unique identities")
    }

    #[test]
    fn resolves_related_records_at_construction() {
        let bundle = sample_bundle();
        let entry = bundle.entry_by_identity("urn:uuid:enc-1").expect("encounter");
        let options = ModelOptions {
            code_concept_maps: vec![terminology::builtin::examination_number().clone()],
            ..ModelOptions::default()
        };
        let model = build(entry, &bundle, &options);

        assert_eq!(model.headline(), Some("Erste Untersuchung"));
        assert_eq!(model.values()[0].value.as_display(), "01.06.2021");
        assert_eq!(model.values()[1].value.as_display(), "Ines Weber");
        assert_eq!(
            model.values()[1].target.as_ref().map(Identity::as_str),
            Some("urn:uuid:prac-1")
        );
        assert_eq!(model.values()[2].value.as_display(), "Geburtsklinik Mitte");
    }

    #[test]
    fn unresolvable_references_become_placeholders() {
        let bundle = Bundle::new(
            None,
            vec![Entry {
                full_url: Identity::new("urn:uuid:enc-2"),
                resource: Resource::from_json(json!({
                    "resourceType": "Encounter",
                    "participant": [{"individual": {"reference": "urn:uuid:gone"}}]
                })),
            }],
        )
        .expect("unique identities");
        let entry = bundle.entry_by_identity("urn:uuid:enc-2").expect("encounter");
        let model = build(entry, &bundle, &ModelOptions::default());

        // Placeholder value, no navigation target: a broken link never throws.
        assert_eq!(model.values()[1].value.as_display(), "-");
        assert!(model.values()[1].target.is_none());
    }

    #[test]
    fn main_value_surfaces_examination_date() {
        let bundle = sample_bundle();
        let entry = bundle.entry_by_identity("urn:uuid:enc-1").expect("encounter");
        let model = build(entry, &bundle, &ModelOptions::default());
        assert_eq!(model.main_value().value.as_display(), "01.06.2021");
        assert_eq!(
            model.main_value().sort_by.as_deref(),
            Some("2021-06-01T12:00:00+02:00")
        );
    }
}
