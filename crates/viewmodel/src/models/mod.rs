//! Per-profile model builders.
//!
//! Each module builds the presentation model for one record kind. Builders
//! are free functions with a common shape, `build(entry, bundle, options)`;
//! the [`crate::model::ModelKind`] tag routes construction. Shared field
//! extraction lives in [`support`].

pub mod composition;
pub mod encounter;
pub mod observation;
pub mod organization;
pub mod patient;
pub mod practitioner;

pub(crate) mod support;
