//! Mapping tables and profile dispatch.
//!
//! A mapping table is the configuration surface of the engine: an ordered
//! list of (profile, constructors, options) entries. Supporting a new record
//! kind means appending an entry here, not changing any engine code. Table
//! order is a semantic ranking — profiles overlap, and the **first**
//! accepting entry always wins.

use fhir::{Bundle, Entry, Profile, Resource};

use crate::model::{ModelKind, RecordModel};
use crate::options::ModelOptions;
use crate::profiles;

/// One table entry: a profile predicate with its constructor chain and
/// presentation options.
#[derive(Clone, Debug)]
pub struct Mapping {
    profile: Profile,
    header: Option<String>,
    constructors: Vec<ModelKind>,
    options: ModelOptions,
}

impl Mapping {
    /// A mapping from a profile to its model constructors.
    ///
    /// An empty constructor list is allowed and falls back to the generic
    /// observation-style projection at dispatch time.
    pub fn new(profile: Profile, constructors: Vec<ModelKind>) -> Self {
        Self {
            profile,
            header: None,
            constructors,
            options: ModelOptions::default(),
        }
    }

    /// Section/group header shown above records this mapping accepts.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Construction options passed to every constructor of this mapping.
    pub fn with_options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    /// The profile this mapping accepts.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

/// Outcome of dispatching one record through a table.
#[derive(Clone, Debug)]
pub enum DispatchOutcome {
    /// A mapping accepted the record and built its models.
    Matched {
        /// The mapping's header, when configured.
        header: Option<String>,

        /// Stable suffix for UI automation ids, derived from the matched
        /// profile.
        test_id_suffix: String,

        /// Models in constructor order.
        models: Vec<RecordModel>,
    },

    /// No mapping accepted the record. Recoverable by design: hosts show a
    /// descriptive message with a way back, never a crash.
    Unsupported {
        /// Name of the claimed profile (or resource type) for the message.
        profile_hint: String,
    },
}

impl DispatchOutcome {
    /// True for the matched case.
    pub fn is_supported(&self) -> bool {
        matches!(self, DispatchOutcome::Matched { .. })
    }
}

/// An ordered, read-only mapping table.
///
/// The table is shared configuration: dispatch never mutates it and the same
/// table serves every record of a pass.
#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    mappings: Vec<Mapping>,
}

impl MappingTable {
    pub fn new(mappings: Vec<Mapping>) -> Self {
        Self { mappings }
    }

    /// The entries in ranking order.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// The profiles of all entries, in table order.
    ///
    /// This is the filter composite flows resolve section references
    /// against: anything the table cannot dispatch is not worth resolving.
    pub fn profile_filter(&self) -> Vec<Profile> {
        self.mappings
            .iter()
            .map(|mapping| *mapping.profile())
            .collect()
    }

    /// Dispatches a record through the table.
    ///
    /// The first mapping whose profile accepts the record wins; its
    /// constructors run in order against the entry. A mapping without
    /// constructors falls back to the generic observation-style model with
    /// the same options. When nothing accepts the record the outcome is
    /// [`DispatchOutcome::Unsupported`] naming the offending profile.
    pub fn dispatch(&self, bundle: &Bundle, entry: &Entry) -> DispatchOutcome {
        let Some(mapping) = self
            .mappings
            .iter()
            .find(|mapping| mapping.profile.is(&entry.resource))
        else {
            let profile_hint = profile_hint(&entry.resource);
            tracing::warn!(
                "no mapping accepts record {}: unsupported profile {}",
                entry.full_url,
                profile_hint
            );
            return DispatchOutcome::Unsupported { profile_hint };
        };

        let models = if mapping.constructors.is_empty() {
            vec![ModelKind::Observation.construct(entry, bundle, &mapping.options)]
        } else {
            mapping
                .constructors
                .iter()
                .map(|kind| kind.construct(entry, bundle, &mapping.options))
                .collect()
        };

        DispatchOutcome::Matched {
            header: mapping.header.clone(),
            test_id_suffix: mapping.profile.name().to_lowercase(),
            models,
        }
    }
}

/// Best available name for an unmapped record's profile.
fn profile_hint(resource: &Resource) -> String {
    resource
        .meta_profiles()
        .first()
        .copied()
        .or_else(|| resource.resource_type())
        .unwrap_or("unbekannt")
        .to_owned()
}

/// The standard table for examination booklet bundles.
///
/// Composition first: it is the broadest structural match and must outrank
/// the kinds it references. The observation entry carries no constructors on
/// purpose, exercising the generic fallback.
pub fn standard_table() -> MappingTable {
    MappingTable::new(vec![
        Mapping::new(profiles::EXAMINATION_COMPOSITION, vec![ModelKind::Composition])
            .with_header("Untersuchungen")
            .with_options(ModelOptions {
                value_concept_maps: vec![terminology::builtin::practitioner_speciality().clone()],
                ..ModelOptions::default()
            }),
        Mapping::new(profiles::CHILD_PATIENT, vec![ModelKind::Patient])
            .with_header("Patient/in")
            .with_options(ModelOptions {
                value_concept_maps: vec![terminology::builtin::administrative_gender().clone()],
                ..ModelOptions::default()
            }),
        Mapping::new(profiles::PRACTITIONER, vec![ModelKind::Practitioner])
            .with_header("Behandelnde Personen")
            .with_options(ModelOptions {
                value_concept_maps: vec![terminology::builtin::practitioner_speciality().clone()],
                ..ModelOptions::default()
            }),
        Mapping::new(profiles::ORGANIZATION, vec![ModelKind::Organization])
            .with_header("Einrichtungen"),
        Mapping::new(profiles::EXAMINATION_ENCOUNTER, vec![ModelKind::Encounter])
            .with_header("Untersuchungstermine")
            .with_options(ModelOptions {
                code_concept_maps: vec![terminology::builtin::examination_number().clone()],
                ..ModelOptions::default()
            }),
        Mapping::new(profiles::EXAMINATION_OBSERVATION, Vec::new())
            .with_header("Ergebnisse")
            .with_options(ModelOptions {
                code_concept_maps: vec![terminology::builtin::examination_number().clone()],
                ..ModelOptions::default()
            }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::{Identity, Resource};
    use serde_json::json;

    fn entry_for(resource: serde_json::Value) -> Entry {
        Entry {
            full_url: Identity::new("urn:uuid:record-1"),
            resource: Resource::from_json(resource),
        }
    }

    fn empty_bundle() -> Bundle {
        Bundle::new(None, Vec::new()).expect("empty bundle")
    }

    #[test]
    fn first_matching_entry_wins() {
        // Both entries accept a Patient; the first decides the outcome.
        let table = MappingTable::new(vec![
            Mapping::new(profiles::CHILD_PATIENT, vec![ModelKind::Patient])
                .with_header("Erste Zeile"),
            Mapping::new(profiles::CHILD_PATIENT, vec![ModelKind::Observation])
                .with_header("Zweite Zeile"),
        ]);
        let entry = entry_for(json!({"resourceType": "Patient"}));

        match table.dispatch(&empty_bundle(), &entry) {
            DispatchOutcome::Matched { header, models, .. } => {
                assert_eq!(header.as_deref(), Some("Erste Zeile"));
                assert_eq!(models.len(), 1);
                assert_eq!(models[0].kind(), ModelKind::Patient);
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn empty_constructor_list_falls_back_to_observation() {
        let table = MappingTable::new(vec![Mapping::new(
            profiles::EXAMINATION_OBSERVATION,
            Vec::new(),
        )]);
        let entry = entry_for(json!({"resourceType": "Observation", "valueString": "ok"}));

        match table.dispatch(&empty_bundle(), &entry) {
            DispatchOutcome::Matched { models, .. } => {
                assert_eq!(models[0].kind(), ModelKind::Observation);
                assert_eq!(models[0].values()[0].value.as_display(), "ok");
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn unmapped_record_reports_profile_hint() {
        let table = MappingTable::new(vec![Mapping::new(
            profiles::CHILD_PATIENT,
            vec![ModelKind::Patient],
        )]);
        let entry = entry_for(json!({
            "resourceType": "Medication",
            "meta": {"profile": ["https://fhir.example.de/StructureDefinition/Medication"]}
        }));

        match table.dispatch(&empty_bundle(), &entry) {
            DispatchOutcome::Unsupported { profile_hint } => {
                assert_eq!(
                    profile_hint,
                    "https://fhir.example.de/StructureDefinition/Medication"
                );
            }
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_does_not_consume_the_table() {
        let table = standard_table();
        let patient = entry_for(json!({"resourceType": "Patient"}));
        let practitioner = entry_for(json!({"resourceType": "Practitioner"}));

        assert!(table.dispatch(&empty_bundle(), &patient).is_supported());
        assert!(table.dispatch(&empty_bundle(), &practitioner).is_supported());
        assert!(table.dispatch(&empty_bundle(), &patient).is_supported());
    }

    #[test]
    fn constructor_chain_builds_one_model_per_kind() {
        let table = MappingTable::new(vec![Mapping::new(
            profiles::CHILD_PATIENT,
            vec![ModelKind::Patient, ModelKind::Observation],
        )]);
        let entry = entry_for(json!({"resourceType": "Patient"}));

        match table.dispatch(&empty_bundle(), &entry) {
            DispatchOutcome::Matched { models, .. } => {
                let kinds: Vec<ModelKind> = models.iter().map(RecordModel::kind).collect();
                assert_eq!(kinds, vec![ModelKind::Patient, ModelKind::Observation]);
            }
            other => panic!("expected match, got {other:?}"),
        }
    }
}
