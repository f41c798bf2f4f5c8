//! Examination document presentation model.
//!
//! Builds the document header view: title, issue date and author labels.
//! Section traversal deliberately does not happen here — section views are
//! re-derived per call in [`crate::flows`] because their ordering depends on
//! caller-supplied compare functions.

use fhir::{resolve, Bundle, Entry, Identity};
use medview_types::display_date;

use crate::model::{ModelKind, RecordModel};
use crate::models::{practitioner, support};
use crate::options::ModelOptions;
use crate::profiles;
use crate::value::ModelValue;

struct AuthorGroup {
    role: String,
    names: Vec<String>,
    first: Identity,
}

/// Resolves the `author` references and groups them by role.
///
/// Two authors sharing a role merge into one label with their names joined —
/// derived from the structured role (speciality or organisation kind), not
/// from display-string heuristics. Unresolvable authors are counted so the
/// caller can emit a single placeholder row.
fn author_groups(entry: &Entry, bundle: &Bundle, options: &ModelOptions) -> (Vec<AuthorGroup>, usize) {
    let mut groups: Vec<AuthorGroup> = Vec::new();
    let mut unresolved = 0;

    for author in entry.resource.array("author") {
        let resolved = support::reference_in(entry, author).and_then(|reference| {
            resolve(
                bundle,
                &[profiles::PRACTITIONER, profiles::ORGANIZATION],
                &reference,
            )
        });
        let Some(found) = resolved else {
            unresolved += 1;
            continue;
        };

        let (role, name) = if profiles::PRACTITIONER.is(&found.resource) {
            let role = practitioner::speciality(&found.resource, &options.value_concept_maps)
                .unwrap_or_else(|| "Behandelnde Person".to_owned());
            (role, support::human_name(&found.resource))
        } else {
            (
                "Einrichtung".to_owned(),
                found.resource.text("name").map(str::to_owned),
            )
        };
        let Some(name) = name else {
            unresolved += 1;
            continue;
        };

        match groups.iter_mut().find(|group| group.role == role) {
            Some(group) => group.names.push(name),
            None => groups.push(AuthorGroup {
                role,
                names: vec![name],
                first: found.full_url.clone(),
            }),
        }
    }

    (groups, unresolved)
}

pub fn build(entry: &Entry, bundle: &Bundle, options: &ModelOptions) -> RecordModel {
    let resource = &entry.resource;

    let title = resource.text("title").map(str::to_owned);
    let date_raw = resource.text("date").map(str::to_owned);
    let date = date_raw.as_deref().map(display_date);

    let mut values = vec![ModelValue::date("Erstellt am", date, date_raw)];

    let (groups, unresolved) = author_groups(entry, bundle, options);
    for group in &groups {
        values.push(
            ModelValue::text(group.role.clone(), Some(group.names.join(", ")))
                .with_target(group.first.clone()),
        );
    }
    if groups.is_empty() && unresolved > 0 {
        values.push(ModelValue::text("Autor/in", None));
    }

    RecordModel::new(
        ModelKind::Composition,
        entry.full_url.clone(),
        options.headline_for(title),
        values,
        Vec::new(),
    )
}
