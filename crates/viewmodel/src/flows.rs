//! Composite resolution flows.
//!
//! Higher-level procedures that chain resolution, slice extraction and
//! dispatch into the section and group views the renderers consume. Flows
//! re-derive their lists on every call — section membership and ordering can
//! depend on the caller's compare function, so nothing here is cached.

use std::cmp::Ordering;

use fhir::{resolve, resolve_all, resolve_first, slice, Bundle, Identity, Profile, Reference};
use serde_json::Value;

use crate::mapping::{DispatchOutcome, MappingTable};
use crate::profiles;

/// One resolved and dispatched record inside a section or group.
#[derive(Clone, Debug)]
pub struct EntryView {
    /// Identity of the resolved record.
    pub identity: Identity,

    /// What dispatch made of it.
    pub outcome: DispatchOutcome,
}

impl EntryView {
    /// Raw sort key of the first model's main value, when present.
    pub fn sort_key(&self) -> Option<String> {
        match &self.outcome {
            DispatchOutcome::Matched { models, .. } => models
                .first()
                .and_then(|model| model.main_value().sort_by),
            DispatchOutcome::Unsupported { .. } => None,
        }
    }
}

/// A section or group view over dispatched records.
///
/// An empty `entries` list is a meaningful state (the section exists but has
/// no content) and must stay visible downstream; the document projection
/// turns it into a placeholder block rather than dropping the section.
#[derive(Clone, Debug)]
pub struct SectionView {
    /// Section title.
    pub title: String,

    /// Informational note attached to the section, when the source carries
    /// one.
    pub hint: Option<String>,

    /// Dispatched entries in section (or compare) order.
    pub entries: Vec<EntryView>,
}

impl SectionView {
    /// True when the section resolved no content.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tie-break ordering for entries within a section or group.
///
/// Compare functions are total orders by convention only: returning
/// `Ordering::Equal` keeps the upstream (bundle/section) order because the
/// sort is stable.
pub type CompareFn = fn(&EntryView, &EntryView) -> Ordering;

/// Orders entries by their models' raw sort keys (dates sort ISO-wise).
pub fn compare_by_sort_key(a: &EntryView, b: &EntryView) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

const HINT_EXTENSION_URL: &str = "https://fhir.example.de/StructureDefinition/Section_Hint";

/// Informational note from a section's extension list.
fn section_hint(section: &Value) -> Option<String> {
    section
        .get("extension")
        .and_then(Value::as_array)?
        .iter()
        .find(|extension| {
            extension.get("url").and_then(Value::as_str) == Some(HINT_EXTENSION_URL)
        })
        .and_then(|extension| extension.get("valueString"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Resolves and dispatches one section's entry references.
///
/// The composition's identity is propagated as the resolution base, so
/// relative entry references stay resolvable. References that resolve to
/// nothing the table could dispatch are logged and omitted — a partially
/// broken section still renders its remaining entries.
fn section_entries(
    bundle: &Bundle,
    table: &MappingTable,
    base: &Identity,
    section: &Value,
    filter: &[Profile],
) -> Vec<EntryView> {
    let mut entries = Vec::new();
    let references = section
        .get("entry")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    for entry_ref in references {
        let Some(target) = entry_ref.get("reference").and_then(Value::as_str) else {
            continue;
        };
        let reference = Reference::new(target, Some(base.clone()));
        let Some(found) = resolve(bundle, filter, &reference) else {
            tracing::warn!("section entry {} did not resolve; omitting", target);
            continue;
        };
        entries.push(EntryView {
            identity: found.full_url.clone(),
            outcome: table.dispatch(bundle, found),
        });
    }
    entries
}

/// Builds section views for the bundle's examination composition.
///
/// The composition is located by profile; walking its generic `section`
/// array goes through slice extraction so titled-but-empty sections survive
/// as empty views. A missing composition degrades to no sections at all —
/// dependent content is omitted, the render itself never fails.
pub fn composition_sections(
    bundle: &Bundle,
    table: &MappingTable,
    compare: Option<CompareFn>,
) -> Vec<SectionView> {
    let Some(composition) = resolve_first(bundle, &[profiles::EXAMINATION_COMPOSITION]) else {
        tracing::warn!("bundle has no examination composition; rendering without sections");
        return Vec::new();
    };

    let filter = table.profile_filter();
    let sections = composition.resource.array("section");
    let slices = slice::all_matches(
        &[profiles::ENTRY_SECTION, profiles::EMPTY_SECTION],
        Some(sections),
    );

    slices
        .into_iter()
        .map(|section| {
            let title = section
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Weitere Angaben")
                .to_owned();
            let mut entries =
                section_entries(bundle, table, &composition.full_url, section, &filter);
            if let Some(compare) = compare {
                entries.sort_by(compare);
            }
            SectionView {
                title,
                hint: section_hint(section),
                entries,
            }
        })
        .collect()
}

/// Builds a flat group view over every record matching the given profiles.
///
/// This is the overview-screen flow for kinds that are not reached through a
/// composition section (for example "all practitioners in the booklet").
pub fn group_by_profile(
    bundle: &Bundle,
    table: &MappingTable,
    group_profiles: &[Profile],
    title: impl Into<String>,
    compare: Option<CompareFn>,
) -> SectionView {
    let mut entries: Vec<EntryView> = resolve_all(bundle, group_profiles)
        .into_iter()
        .map(|entry| EntryView {
            identity: entry.full_url.clone(),
            outcome: table.dispatch(bundle, entry),
        })
        .collect();
    if let Some(compare) = compare {
        entries.sort_by(compare);
    }
    SectionView {
        title: title.into(),
        hint: None,
        entries,
    }
}
