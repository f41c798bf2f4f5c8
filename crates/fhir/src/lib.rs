//! FHIR bundle support for the medview view-model engine.
//!
//! This crate provides the **data model** and **resolution primitives** the
//! engine is built on:
//! - [`Bundle`]/[`Entry`]/[`Resource`]: an immutable, identity-indexed
//!   collection of structurally-typed records
//! - [`Profile`]: structural "is-a" predicates replacing type tags
//! - [`Reference`] resolution against a bundle, filtered by profile
//! - slice extraction out of generically-typed repeated containers
//!
//! This crate focuses on:
//! - faithful representation of externally validated record data
//! - pure, deterministic lookups (no side effects, no caching)
//! - graceful degradation: lookup misses are `Option`/empty results, never
//!   errors
//!
//! Errors exist only at the parse boundary (malformed JSON, duplicate entry
//! identities). Presentation meaning lives in `medview-model`; this crate
//! never interprets record fields beyond the documented accessors.

pub mod bundle;
pub mod profile;
pub mod reference;
pub mod resource;
pub mod slice;

// Re-export the working set
pub use bundle::{Bundle, Entry, Identity};
pub use profile::{satisfies_any, Profile, SliceProfile};
pub use reference::{resolve, resolve_all, resolve_first, Reference};
pub use resource::Resource;
pub use slice::{all_matches, first_match};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("bundle schema mismatch at {path}: {source}")]
    Schema {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("duplicate entry identity: {0}")]
    DuplicateIdentity(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
