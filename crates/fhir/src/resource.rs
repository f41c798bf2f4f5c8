//! JSON-backed record payloads.
//!
//! Records arrive as externally validated structured data with no guaranteed
//! type discriminator. This module wraps the raw JSON and exposes the narrow
//! set of accessors the engine is allowed to use; profile membership is
//! decided by predicates in [`crate::profile`], never by inspecting shape
//! directly at call sites.

use serde_json::Value;

const EMPTY: &[Value] = &[];

/// A single record payload inside a bundle entry.
///
/// Thin wrapper over a JSON object. Accessors are total: absent or
/// differently-typed fields yield `None`/empty rather than panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    data: Value,
}

impl Resource {
    /// Wraps a JSON value as a record payload.
    pub fn from_json(data: Value) -> Self {
        Self { data }
    }

    /// The raw JSON representation.
    pub fn as_json(&self) -> &Value {
        &self.data
    }

    /// The `resourceType` field, when present.
    pub fn resource_type(&self) -> Option<&str> {
        self.text("resourceType")
    }

    /// The record's local `id`, when present.
    pub fn local_id(&self) -> Option<&str> {
        self.text("id")
    }

    /// Canonical profile URLs claimed in `meta.profile`.
    pub fn meta_profiles(&self) -> Vec<&str> {
        self.path("meta.profile")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// True when `meta.profile` claims the given canonical URL.
    ///
    /// A trailing `|<version>` suffix on the claimed URL is ignored, so a
    /// canonical without version matches all versions of the profile.
    pub fn claims_profile(&self, canonical: &str) -> bool {
        self.meta_profiles()
            .iter()
            .any(|claimed| *claimed == canonical || strip_version(claimed) == canonical)
    }

    /// A top-level field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_object().and_then(|obj| obj.get(name))
    }

    /// A top-level string field by name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// A top-level array field by name; absent or non-array yields empty.
    pub fn array(&self, name: &str) -> &[Value] {
        self.field(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY)
    }

    /// Navigates nested objects with a dot-separated path.
    ///
    /// Only object steps are supported; arrays terminate navigation (the
    /// caller decides how to iterate repeated containers).
    pub fn path(&self, path: &str) -> Option<&Value> {
        let mut current = &self.data;
        for part in path.split('.') {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// A nested string value with a dot-separated path.
    pub fn path_text(&self, path: &str) -> Option<&str> {
        self.path(path).and_then(Value::as_str)
    }
}

fn strip_version(canonical: &str) -> &str {
    match canonical.split_once('|') {
        Some((url, _version)) => url,
        None => canonical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Resource {
        Resource::from_json(json!({
            "resourceType": "Patient",
            "id": "p1",
            "meta": {
                "profile": ["https://fhir.example.de/StructureDefinition/Child_Patient|1.0.1"]
            },
            "name": [{"family": "Mustermann", "given": ["Max"]}],
            "birthDate": "2021-06-01"
        }))
    }

    #[test]
    fn reads_top_level_fields() {
        let resource = sample();
        assert_eq!(resource.resource_type(), Some("Patient"));
        assert_eq!(resource.local_id(), Some("p1"));
        assert_eq!(resource.text("birthDate"), Some("2021-06-01"));
        assert!(resource.text("missing").is_none());
    }

    #[test]
    fn array_accessor_defaults_to_empty() {
        let resource = sample();
        assert_eq!(resource.array("name").len(), 1);
        assert!(resource.array("missing").is_empty());
        assert!(resource.array("birthDate").is_empty());
    }

    #[test]
    fn path_navigates_objects_only() {
        let resource = sample();
        assert!(resource.path("meta.profile").is_some());
        assert!(resource.path("name.family").is_none());
        assert!(resource.path("meta.absent").is_none());
    }

    #[test]
    fn claims_profile_ignores_version_suffix() {
        let resource = sample();
        assert!(resource.claims_profile("https://fhir.example.de/StructureDefinition/Child_Patient"));
        assert!(resource
            .claims_profile("https://fhir.example.de/StructureDefinition/Child_Patient|1.0.1"));
        assert!(!resource.claims_profile("https://fhir.example.de/StructureDefinition/Other"));
    }
}
