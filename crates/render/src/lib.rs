//! Dual rendering of constructed view models.
//!
//! Every model renders into two independent, data-equivalent projections:
//! - [`list`]: navigable items for the interactive record browser
//! - [`document`]: nested content blocks for the paginated export
//!
//! Both projections read the same constructed `values`/`headline` state;
//! neither triggers resolution the models did not already perform. The one
//! sanctioned exception is the document-only sub-table style, which expands
//! its nested sub-models lazily at projection time. Projection is total —
//! there is no error type here; anything missing was already reduced to a
//! placeholder during model construction.
//!
//! Adding a third output format means adding a third projection module over
//! the same model data, not touching resolution or dispatch.

pub mod document;
pub mod list;

pub use document::{DocumentNode, TableRow};
pub use list::{ListItem, ListSection, ListValue};
