//! Shared field extraction for model builders.
//!
//! Everything here is total: absent or malformed fields yield `None`, never
//! a panic. Builders decide how a miss degrades (usually to "-").

use fhir::{Entry, Reference, Resource};
use serde_json::Value;
use terminology::{translate, translate_all, ConceptMap};

/// A person's display name from a `name` array.
///
/// Prefers the entry marked `use: official`, falls back to the first entry;
/// given names join before the family name.
pub fn human_name(resource: &Resource) -> Option<String> {
    let names = resource.array("name");
    let name = names
        .iter()
        .find(|name| name.get("use").and_then(Value::as_str) == Some("official"))
        .or_else(|| names.first())?;

    let mut parts: Vec<String> = name
        .get("given")
        .and_then(Value::as_array)
        .map(|given| {
            given
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    if let Some(family) = name.get("family").and_then(Value::as_str) {
        parts.push(family.to_owned());
    }

    if parts.is_empty() {
        // A text-only name is still a name.
        return name
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_owned);
    }
    Some(parts.join(" "))
}

/// `(code, system)` pairs from a codeable concept's coding list.
pub fn codings(concept: &Value) -> Vec<(&str, Option<&str>)> {
    concept
        .get("coding")
        .and_then(Value::as_array)
        .map(|codings| {
            codings
                .iter()
                .filter_map(|coding| {
                    let code = coding.get("code").and_then(Value::as_str)?;
                    let system = coding.get("system").and_then(Value::as_str);
                    Some((code, system))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Display text for a codeable concept.
///
/// Codings are translated through the supplied maps and joined with ", ";
/// a single untranslated coding falls back to its own `display` before the
/// raw code; with no codings at all, the concept's `text` is used.
pub fn coded_text(concept: &Value, maps: &[ConceptMap]) -> Option<String> {
    let pairs = codings(concept);
    if pairs.is_empty() {
        return concept.get("text").and_then(Value::as_str).map(str::to_owned);
    }

    if let [(code, system)] = pairs.as_slice() {
        let translated = translate(code, *system, maps);
        if translated == *code {
            if let Some(display) = concept
                .get("coding")
                .and_then(Value::as_array)
                .and_then(|codings| codings.first())
                .and_then(|coding| coding.get("display"))
                .and_then(Value::as_str)
            {
                return Some(display.to_owned());
            }
        }
        return Some(translated);
    }

    Some(translate_all(pairs, maps, ", "))
}

/// A reference read from an object field carrying `{ "reference": … }`.
///
/// The containing entry's identity is propagated as the base, so relative
/// targets resolve within the bundle.
pub fn reference_in(entry: &Entry, field: &Value) -> Option<Reference> {
    let target = field.get("reference").and_then(Value::as_str)?;
    Some(Reference::new(target, Some(entry.full_url.clone())))
}

/// A reference from a named top-level field of the entry's record.
pub fn field_reference(entry: &Entry, name: &str) -> Option<Reference> {
    let field = entry.resource.field(name)?;
    reference_in(entry, field)
}

/// An identifier value matched by identifier system.
pub fn identifier_value<'a>(resource: &'a Resource, system: &str) -> Option<&'a str> {
    resource.array("identifier").iter().find_map(|identifier| {
        if identifier.get("system").and_then(Value::as_str) == Some(system) {
            identifier.get("value").and_then(Value::as_str)
        } else {
            None
        }
    })
}
