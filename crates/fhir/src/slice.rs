//! Slice extraction from generically-typed repeated containers.
//!
//! Fields like `extension` or `section` hold loosely-typed element arrays in
//! which named narrower structures ("slices") are interleaved. Extraction
//! locates the elements matching a set of slice profiles; slices are not
//! separately identified entities and live only as borrows into the
//! container.

use serde_json::Value;

use crate::profile::SliceProfile;

/// The first element satisfying any of the given slice profiles.
///
/// The container is iterated in original order. For each element, profiles
/// are checked in the order supplied by the caller, mirroring mapping
/// dispatch; an absent or empty container yields `None`.
pub fn first_match<'a>(
    profiles: &[SliceProfile],
    container: Option<&'a [Value]>,
) -> Option<&'a Value> {
    container?
        .iter()
        .find(|element| profiles.iter().any(|profile| profile.is(element)))
}

/// Every element satisfying any of the given slice profiles, container order
/// preserved.
pub fn all_matches<'a>(profiles: &[SliceProfile], container: Option<&'a [Value]>) -> Vec<&'a Value> {
    let Some(container) = container else {
        return Vec::new();
    };
    container
        .iter()
        .filter(|element| profiles.iter().any(|profile| profile.is(element)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_birth_section(element: &Value) -> bool {
        element.get("title").and_then(Value::as_str) == Some("Geburtsanamnese")
    }

    fn is_examination_section(element: &Value) -> bool {
        element.get("title").and_then(Value::as_str) == Some("Untersuchung")
    }

    const BIRTH: SliceProfile = SliceProfile::new("Geburtsanamnese", is_birth_section);
    const EXAMINATION: SliceProfile = SliceProfile::new("Untersuchung", is_examination_section);

    fn sections() -> Vec<Value> {
        vec![
            json!({"title": "Sonstiges"}),
            json!({"title": "Untersuchung", "entry": [{"reference": "obs-1"}]}),
            json!({"title": "Geburtsanamnese"}),
            json!({"title": "Untersuchung", "entry": [{"reference": "obs-2"}]}),
        ]
    }

    #[test]
    fn first_match_takes_original_order() {
        let container = sections();
        let found =
            first_match(&[EXAMINATION], Some(&container)).expect("examination section exists");
        assert_eq!(found["entry"][0]["reference"], "obs-1");
    }

    #[test]
    fn all_matches_preserves_order() {
        let container = sections();
        let found = all_matches(&[EXAMINATION, BIRTH], Some(&container));
        let titles: Vec<&str> = found
            .iter()
            .filter_map(|s| s.get("title").and_then(Value::as_str))
            .collect();
        assert_eq!(titles, vec!["Untersuchung", "Geburtsanamnese", "Untersuchung"]);
    }

    #[test]
    fn first_is_head_of_all_when_a_match_exists() {
        let container = sections();
        let profiles = [BIRTH, EXAMINATION];
        let all = all_matches(&profiles, Some(&container));
        let first = first_match(&profiles, Some(&container));
        assert_eq!(first, all.first().copied());
    }

    #[test]
    fn absent_or_empty_container_yields_nothing() {
        assert!(first_match(&[BIRTH], None).is_none());
        assert!(all_matches(&[BIRTH], None).is_empty());
        assert!(first_match(&[BIRTH], Some(&[])).is_none());
        assert!(all_matches(&[BIRTH], Some(&[])).is_empty());
    }

    #[test]
    fn no_profiles_matches_nothing() {
        let container = sections();
        assert!(first_match(&[], Some(&container)).is_none());
    }
}
