//! View-model construction for clinical record bundles.
//!
//! This crate turns a bundle plus a declarative mapping table into a
//! hierarchical, navigable view-model tree:
//! - [`RecordModel`]: the presentation model built for one resolved record
//! - [`MappingTable`]: ordered (profile, constructors, options) configuration
//!   dispatched by first match
//! - [`flows`]: composite procedures that chain resolution, slice extraction
//!   and dispatch into section and group views
//!
//! Models are transient: each resolution pass builds a fresh tree from the
//! read-only bundle, and the tree is discarded after rendering. Nothing in
//! here mutates shared state, and nothing here returns an error — every miss
//! (unresolvable reference, unmapped profile, untranslatable code) degrades
//! to a placeholder or a descriptive outcome at the point it is discovered.
//! Supporting a new record kind means adding a mapping entry, not touching
//! the engine.

pub mod flows;
pub mod mapping;
pub mod model;
pub mod models;
pub mod options;
pub mod profiles;
pub mod value;

pub use flows::{
    compare_by_sort_key, composition_sections, group_by_profile, CompareFn, EntryView, SectionView,
};
pub use mapping::{standard_table, DispatchOutcome, Mapping, MappingTable};
pub use model::{ModelKind, RecordModel};
pub use options::ModelOptions;
pub use value::{ModelValue, RenderKind};
