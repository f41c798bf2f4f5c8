//! Concept-map translation for coded clinical values.
//!
//! A concept map is an ordered code-to-display-text table scoped to one
//! coding system. Callers layer several maps per field; maps are tried in
//! order and the first hit wins. Translation is **total**: a code absent from
//! every map is returned unchanged, so display always degrades to the raw
//! code rather than failing.
//!
//! Maps are YAML documents (the workspace's configuration format); the
//! built-in maps for the supported record kinds live in [`builtin`].

pub mod builtin;
pub mod concept_map;

pub use concept_map::{translate, translate_all, ConceptMap, ConceptMapping};

/// Errors returned when loading concept-map configuration.
#[derive(Debug, thiserror::Error)]
pub enum TerminologyError {
    #[error("concept map schema mismatch at {path}: {source}")]
    Schema {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Type alias for Results that can fail with a [`TerminologyError`].
pub type TerminologyResult<T> = Result<T, TerminologyError>;
