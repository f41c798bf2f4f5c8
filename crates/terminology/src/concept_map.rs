//! Concept-map model and translation.

use serde::{Deserialize, Serialize};

use crate::{TerminologyError, TerminologyResult};

/// One code-to-display equivalence inside a concept map.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConceptMapping {
    /// Source code within the map's coding system.
    pub code: String,

    /// Human-readable display text for the code.
    pub display: String,
}

/// An ordered code-to-display translation table scoped to one coding system.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConceptMap {
    /// Coding system this map translates.
    pub system: String,

    /// Equivalences in priority order.
    pub concepts: Vec<ConceptMapping>,
}

impl ConceptMap {
    /// Parses a concept map from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path"
    /// (e.g. `concepts[2].display`) to the failing field when the YAML does
    /// not match the schema.
    ///
    /// # Errors
    ///
    /// Returns [`TerminologyError::Schema`] when the YAML is malformed, a
    /// field has an unexpected type, or unknown keys are present.
    pub fn from_yaml_str(yaml_text: &str) -> TerminologyResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        serde_path_to_error::deserialize(deserializer).map_err(|err| {
            let path = err.path().to_string();
            let path = if path.is_empty() {
                "<root>".to_owned()
            } else {
                path
            };
            TerminologyError::Schema {
                path,
                source: err.into_inner(),
            }
        })
    }

    /// The display text for a code, when this map carries it.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.concepts
            .iter()
            .find(|concept| concept.code == code)
            .map(|concept| concept.display.as_str())
    }
}

/// Translates a code through layered concept maps.
///
/// Maps are tried in the order supplied; when `system` is given, maps scoped
/// to a different system are skipped. The first hit wins. A code no map
/// carries is returned unchanged — translation degrades, it never fails or
/// returns empty text.
pub fn translate(code: &str, system: Option<&str>, maps: &[ConceptMap]) -> String {
    maps.iter()
        .filter(|map| system.map_or(true, |s| map.system == s))
        .find_map(|map| map.lookup(code))
        .unwrap_or(code)
        .to_owned()
}

/// Translates several codings and joins them for display.
///
/// Aggregation is deliberately the caller's concern, not the translator's;
/// this helper is that caller-side policy: each `(code, system)` pair is
/// translated on its own and the results are joined with `separator`
/// (typically `", "`). An empty input yields an empty string.
pub fn translate_all<'a>(
    codings: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    maps: &[ConceptMap],
    separator: &str,
) -> String {
    codings
        .into_iter()
        .map(|(code, system)| translate(code, system, maps))
        .collect::<Vec<_>>()
        .join(separator)
}
