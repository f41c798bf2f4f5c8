//! Structural profile predicates.
//!
//! Records carry no reliable type discriminator; membership in a profile is
//! decided by a structural predicate supplied with the profile. A record may
//! satisfy zero, one, or many profiles, so every consumer that holds several
//! profiles must treat their order as a semantic ranking (first match wins).

use serde_json::Value;

use crate::resource::Resource;

/// How a [`Profile`] decides membership.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Record claims the canonical URL in `meta.profile`
    /// (version suffixes ignored).
    Canonical(&'static str),

    /// Record carries the given `resourceType`.
    ResourceType(&'static str),

    /// Caller-supplied structural check.
    Custom(fn(&Resource) -> bool),
}

/// A structural category a record may belong to.
///
/// Profiles are cheap, copyable configuration values; the engine only ever
/// calls [`Profile::is`] and [`Profile::name`].
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    name: &'static str,
    matcher: Matcher,
}

impl Profile {
    /// A profile matched by canonical URL in `meta.profile`.
    pub const fn canonical(name: &'static str, url: &'static str) -> Self {
        Self {
            name,
            matcher: Matcher::Canonical(url),
        }
    }

    /// A profile matched by `resourceType`.
    pub const fn resource_type(name: &'static str, resource_type: &'static str) -> Self {
        Self {
            name,
            matcher: Matcher::ResourceType(resource_type),
        }
    }

    /// A profile matched by an arbitrary structural predicate.
    pub const fn custom(name: &'static str, predicate: fn(&Resource) -> bool) -> Self {
        Self {
            name,
            matcher: Matcher::Custom(predicate),
        }
    }

    /// The profile's display name (used in "unsupported profile" messages).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Structural membership test.
    pub fn is(&self, resource: &Resource) -> bool {
        match self.matcher {
            Matcher::Canonical(url) => resource.claims_profile(url),
            Matcher::ResourceType(resource_type) => {
                resource.resource_type() == Some(resource_type)
            }
            Matcher::Custom(predicate) => predicate(resource),
        }
    }
}

/// True when the record satisfies at least one of the given profiles.
///
/// An empty profile set is satisfied by nothing; resolution against an empty
/// filter always misses.
pub fn satisfies_any(profiles: &[Profile], resource: &Resource) -> bool {
    profiles.iter().any(|profile| profile.is(resource))
}

/// A narrower profile for sub-structures inside repeated containers.
///
/// Slices are not full records: they are raw JSON elements drawn from fields
/// like `section` or `extension`, so their predicates work on [`Value`].
#[derive(Debug, Clone, Copy)]
pub struct SliceProfile {
    name: &'static str,
    predicate: fn(&Value) -> bool,
}

impl SliceProfile {
    /// Creates a slice profile from a structural predicate.
    pub const fn new(name: &'static str, predicate: fn(&Value) -> bool) -> Self {
        Self { name, predicate }
    }

    /// The slice's display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Structural membership test for one container element.
    pub fn is(&self, element: &Value) -> bool {
        (self.predicate)(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CHILD_PATIENT: Profile = Profile::canonical(
        "Child_Patient",
        "https://fhir.example.de/StructureDefinition/Child_Patient",
    );
    const ANY_PATIENT: Profile = Profile::resource_type("Patient", "Patient");

    fn child_patient() -> Resource {
        Resource::from_json(json!({
            "resourceType": "Patient",
            "meta": {"profile": [
                "https://fhir.example.de/StructureDefinition/Child_Patient|1.0.1"
            ]}
        }))
    }

    #[test]
    fn canonical_profile_matches_versioned_claim() {
        assert!(CHILD_PATIENT.is(&child_patient()));
    }

    #[test]
    fn resource_type_profile_overlaps_canonical() {
        // Profiles may overlap; both accept the same record.
        let resource = child_patient();
        assert!(ANY_PATIENT.is(&resource));
        assert!(CHILD_PATIENT.is(&resource));
    }

    #[test]
    fn custom_profile_runs_structural_check() {
        fn has_birth_date(resource: &Resource) -> bool {
            resource.text("birthDate").is_some()
        }
        let profile = Profile::custom("With_Birth_Date", has_birth_date);
        assert!(!profile.is(&child_patient()));
        assert!(profile.is(&Resource::from_json(
            json!({"resourceType": "Patient", "birthDate": "2021-06-01"})
        )));
    }

    #[test]
    fn empty_profile_set_is_never_satisfied() {
        assert!(!satisfies_any(&[], &child_patient()));
    }
}
