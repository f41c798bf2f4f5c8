//! Built-in concept maps for the supported record kinds.
//!
//! These ship as YAML assets and are parsed once on first use. A malformed
//! built-in asset is a programming error, not an input error, so first use
//! panics rather than propagating a result.

use std::sync::LazyLock;

use crate::concept_map::ConceptMap;

static EXAMINATION_NUMBER: LazyLock<ConceptMap> = LazyLock::new(|| {
    ConceptMap::from_yaml_str(include_str!("../assets/examination_number.yaml"))
        .expect("built-in examination number map is valid")
});

static ADMINISTRATIVE_GENDER: LazyLock<ConceptMap> = LazyLock::new(|| {
    ConceptMap::from_yaml_str(include_str!("../assets/administrative_gender.yaml"))
        .expect("built-in administrative gender map is valid")
});

static PRACTITIONER_SPECIALITY: LazyLock<ConceptMap> = LazyLock::new(|| {
    ConceptMap::from_yaml_str(include_str!("../assets/practitioner_speciality.yaml"))
        .expect("built-in practitioner speciality map is valid")
});

/// Examination numbers (U1 … U9) to their display names.
pub fn examination_number() -> &'static ConceptMap {
    &EXAMINATION_NUMBER
}

/// Administrative gender codes to their display names.
pub fn administrative_gender() -> &'static ConceptMap {
    &ADMINISTRATIVE_GENDER
}

/// Practitioner speciality codes to their display names.
pub fn practitioner_speciality() -> &'static ConceptMap {
    &PRACTITIONER_SPECIALITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept_map::translate;

    #[test]
    fn builtin_maps_parse() {
        assert_eq!(examination_number().lookup("U1"), Some("Erste Untersuchung"));
        assert_eq!(administrative_gender().lookup("female"), Some("weiblich"));
        assert_eq!(
            practitioner_speciality().lookup("03"),
            Some("Hebamme/Entbindungspfleger")
        );
    }

    #[test]
    fn builtin_translation_falls_back_on_unknown_codes() {
        let maps = [examination_number().clone()];
        assert_eq!(translate("U1", None, &maps), "Erste Untersuchung");
        assert_eq!(translate("U10", None, &maps), "U10");
    }
}
