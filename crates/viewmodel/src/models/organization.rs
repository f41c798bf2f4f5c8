//! Organisation presentation model.

use fhir::{Bundle, Entry, Resource};
use serde_json::Value;

use crate::model::{ModelKind, RecordModel};
use crate::options::ModelOptions;
use crate::value::ModelValue;

/// Single-line postal address: street lines, then postcode and city.
fn address_line(resource: &Resource) -> Option<String> {
    let address = resource.array("address").first()?;

    let mut parts: Vec<String> = address
        .get("line")
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let postal = address.get("postalCode").and_then(Value::as_str);
    let city = address.get("city").and_then(Value::as_str);
    match (postal, city) {
        (Some(postal), Some(city)) => parts.push(format!("{postal} {city}")),
        (Some(postal), None) => parts.push(postal.to_owned()),
        (None, Some(city)) => parts.push(city.to_owned()),
        (None, None) => {}
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// First phone contact point, when present.
fn phone(resource: &Resource) -> Option<String> {
    resource.array("telecom").iter().find_map(|telecom| {
        if telecom.get("system").and_then(Value::as_str) == Some("phone") {
            telecom
                .get("value")
                .and_then(Value::as_str)
                .map(str::to_owned)
        } else {
            None
        }
    })
}

pub fn build(entry: &Entry, _bundle: &Bundle, options: &ModelOptions) -> RecordModel {
    let resource = &entry.resource;

    let name = resource.text("name").map(str::to_owned);
    let values = vec![
        ModelValue::text("Name", name.clone()),
        ModelValue::text("Adresse", address_line(resource)),
        ModelValue::text("Telefon", phone(resource)),
    ];

    RecordModel::new(
        ModelKind::Organization,
        entry.full_url.clone(),
        options.headline_for(name),
        values,
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::Identity;
    use serde_json::json;

    #[test]
    fn builds_address_and_phone() {
        let entry = Entry {
            full_url: Identity::new("urn:uuid:org-1"),
            resource: Resource::from_json(json!({
                "resourceType": "Organization",
                "name": "Kinderarztpraxis Sonnenschein",
                "address": [{
                    "line": ["Musterstraße 12"],
                    "postalCode": "10115",
                    "city": "Berlin"
                }],
                "telecom": [
                    {"system": "fax", "value": "030 111"},
                    {"system": "phone", "value": "030 222"}
                ]
            })),
        };
        let bundle = Bundle::new(None, Vec::new()).expect("empty bundle");
        let model = build(&entry, &bundle, &ModelOptions::default());

        assert_eq!(model.headline(), Some("Kinderarztpraxis Sonnenschein"));
        assert_eq!(
            model.values()[1].value.as_display(),
            "Musterstraße 12, 10115 Berlin"
        );
        assert_eq!(model.values()[2].value.as_display(), "030 222");
    }

    #[test]
    fn partial_address_still_renders() {
        let entry = Entry {
            full_url: Identity::new("urn:uuid:org-2"),
            resource: Resource::from_json(json!({
                "resourceType": "Organization",
                "address": [{"city": "Berlin"}]
            })),
        };
        let bundle = Bundle::new(None, Vec::new()).expect("empty bundle");
        let model = build(&entry, &bundle, &ModelOptions::default());
        assert_eq!(model.values()[1].value.as_display(), "Berlin");
        assert_eq!(model.values()[0].value.as_display(), "-");
    }
}
