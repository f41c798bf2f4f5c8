//! Paginated document projection.
//!
//! Produces the nested block descriptors the external typesetting
//! collaborator consumes: headings, two-column label/value tables, horizontal
//! rules, page-break markers, notes and placeholders. The tree is built once
//! per export request from already-constructed models; the only lazy work is
//! expanding sub-table values into their nested sub-models.

use fhir::Bundle;
use medview_model::{
    DispatchOutcome, ModelOptions, RecordModel, RenderKind, SectionView,
};
use serde::Serialize;

/// Placeholder text for a section that resolved no entries.
pub const NO_ENTRIES: &str = "Keine Einträge vorhanden";

/// One row of a two-column label/value table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

/// A block descriptor of the export document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DocumentNode {
    /// Section or record heading.
    Heading { level: u8, text: String },

    /// Two-column label/value table.
    Table { rows: Vec<TableRow> },

    /// Informational note (section hints).
    Note { text: String },

    /// Horizontal separator between records.
    Rule,

    /// Page-break marker between top-level sections.
    PageBreak,

    /// Explicit "nothing here" block; sections are never silently omitted.
    Placeholder { text: String },
}

/// Projects one model into document blocks.
///
/// Emits the model's heading (when it has one) and a table over **all** of
/// its values in model order, then nested blocks for sub-table values and
/// constructed sub-models one heading level down. Sub-table expansion is the
/// document-only lazy path: the referenced entry's models are built here, at
/// projection time.
pub fn project_model(bundle: &Bundle, model: &RecordModel, level: u8) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();

    if let Some(headline) = model.headline() {
        nodes.push(DocumentNode::Heading {
            level,
            text: headline.to_owned(),
        });
    }

    let rows: Vec<TableRow> = model
        .values()
        .iter()
        .map(|value| TableRow {
            label: value.label.clone(),
            value: value.value.as_display().to_owned(),
        })
        .collect();
    nodes.push(DocumentNode::Table { rows });

    // Document-only nested tables for sub-table values.
    for value in model.values() {
        if value.render_as != RenderKind::SubTable {
            continue;
        }
        let Some(sub_entry) = value
            .sub_entry
            .as_ref()
            .and_then(|identity| bundle.entry_by_identity(identity.as_str()))
        else {
            continue;
        };
        for kind in &value.sub_models {
            let sub_model = kind.construct(sub_entry, bundle, &ModelOptions::default());
            nodes.extend(project_model(bundle, &sub_model, level.saturating_add(1)));
        }
    }

    for sub_model in model.sub_models() {
        nodes.extend(project_model(bundle, sub_model, level.saturating_add(1)));
    }

    nodes
}

/// Projects section views into the export document's block tree.
///
/// Every section renders its heading and hint; a section whose resolved
/// model list is empty emits exactly one placeholder block instead of being
/// dropped. Records within a section are separated by rules, sections by
/// page breaks.
pub fn project_sections(bundle: &Bundle, sections: &[SectionView]) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();

    for (position, section) in sections.iter().enumerate() {
        if position > 0 {
            nodes.push(DocumentNode::PageBreak);
        }
        nodes.push(DocumentNode::Heading {
            level: 1,
            text: section.title.clone(),
        });
        if let Some(hint) = &section.hint {
            nodes.push(DocumentNode::Note { text: hint.clone() });
        }

        if section.is_empty() {
            nodes.push(DocumentNode::Placeholder {
                text: NO_ENTRIES.to_owned(),
            });
            continue;
        }

        let mut first_record = true;
        for entry in &section.entries {
            match &entry.outcome {
                DispatchOutcome::Matched { models, .. } => {
                    for model in models {
                        if !first_record {
                            nodes.push(DocumentNode::Rule);
                        }
                        first_record = false;
                        nodes.extend(project_model(bundle, model, 2));
                    }
                }
                DispatchOutcome::Unsupported { profile_hint } => {
                    if !first_record {
                        nodes.push(DocumentNode::Rule);
                    }
                    first_record = false;
                    nodes.push(DocumentNode::Placeholder {
                        text: format!("Nicht unterstütztes Dokument: {profile_hint}"),
                    });
                }
            }
        }
    }

    nodes
}
