//! The profile set the standard mapping table supports.
//!
//! Profiles combine canonical-URL claims with structural fallbacks, so
//! bundles from sources that omit `meta.profile` still dispatch. A record may
//! satisfy several of these at once; the mapping table's order decides which
//! one wins.

use fhir::{Profile, Resource, SliceProfile};
use serde_json::Value;

/// Canonical profile URLs of the supported record kinds.
pub mod canonical {
    pub const EXAMINATION_COMPOSITION: &str =
        "https://fhir.example.de/StructureDefinition/Examination_Composition";
    pub const CHILD_PATIENT: &str = "https://fhir.example.de/StructureDefinition/Child_Patient";
    pub const PRACTITIONER: &str = "https://fhir.example.de/StructureDefinition/Practitioner";
    pub const ORGANIZATION: &str = "https://fhir.example.de/StructureDefinition/Organization";
    pub const EXAMINATION_ENCOUNTER: &str =
        "https://fhir.example.de/StructureDefinition/Examination_Encounter";
    pub const EXAMINATION_OBSERVATION: &str =
        "https://fhir.example.de/StructureDefinition/Examination_Observation";
}

fn is_examination_composition(resource: &Resource) -> bool {
    resource.claims_profile(canonical::EXAMINATION_COMPOSITION)
        || resource.resource_type() == Some("Composition")
}

fn is_child_patient(resource: &Resource) -> bool {
    resource.claims_profile(canonical::CHILD_PATIENT) || resource.resource_type() == Some("Patient")
}

fn is_practitioner(resource: &Resource) -> bool {
    resource.claims_profile(canonical::PRACTITIONER)
        || resource.resource_type() == Some("Practitioner")
}

fn is_organization(resource: &Resource) -> bool {
    resource.claims_profile(canonical::ORGANIZATION)
        || resource.resource_type() == Some("Organization")
}

fn is_examination_encounter(resource: &Resource) -> bool {
    resource.claims_profile(canonical::EXAMINATION_ENCOUNTER)
        || resource.resource_type() == Some("Encounter")
}

fn is_examination_observation(resource: &Resource) -> bool {
    resource.claims_profile(canonical::EXAMINATION_OBSERVATION)
        || resource.resource_type() == Some("Observation")
}

/// Composition carrying the examination document.
pub const EXAMINATION_COMPOSITION: Profile =
    Profile::custom("Examination_Composition", is_examination_composition);

/// The child the record belongs to.
pub const CHILD_PATIENT: Profile = Profile::custom("Child_Patient", is_child_patient);

/// Treating practitioner.
pub const PRACTITIONER: Profile = Profile::custom("Practitioner", is_practitioner);

/// Care organisation.
pub const ORGANIZATION: Profile = Profile::custom("Organization", is_organization);

/// Examination visit.
pub const EXAMINATION_ENCOUNTER: Profile =
    Profile::custom("Examination_Encounter", is_examination_encounter);

/// Examination finding.
pub const EXAMINATION_OBSERVATION: Profile =
    Profile::custom("Examination_Observation", is_examination_observation);

fn section_carries_entries(element: &Value) -> bool {
    element
        .get("entry")
        .and_then(Value::as_array)
        .is_some_and(|entries| !entries.is_empty())
}

fn section_is_empty(element: &Value) -> bool {
    element.get("title").is_some() && !section_carries_entries(element)
}

/// Composition section slice that references at least one entry.
pub const ENTRY_SECTION: SliceProfile = SliceProfile::new("Entry_Section", section_carries_entries);

/// Composition section slice without entry references (titled but empty).
pub const EMPTY_SECTION: SliceProfile = SliceProfile::new("Empty_Section", section_is_empty);
