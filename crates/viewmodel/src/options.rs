//! Per-mapping construction options.

use terminology::ConceptMap;

/// Options a mapping passes into model construction.
///
/// Options are configuration, not state: they are owned by the mapping table
/// and shared read-only across every record the mapping accepts.
#[derive(Clone, Debug, Default)]
pub struct ModelOptions {
    /// Replaces the model's generated value label (for example an
    /// observation's coded label).
    pub custom_label: Option<String>,

    /// Replaces the computed headline.
    pub custom_headline: Option<String>,

    /// Suppresses the headline entirely; wins over `custom_headline`.
    pub no_headline: bool,

    /// Suppresses the record's value row (label-only presentations).
    pub no_value: bool,

    /// Concept maps for translating the record's *code* (what the record is).
    pub code_concept_maps: Vec<ConceptMap>,

    /// Concept maps for translating the record's *value* (what was found).
    pub value_concept_maps: Vec<ConceptMap>,
}

impl ModelOptions {
    /// Applies headline policy to a computed default.
    pub fn headline_for(&self, computed: Option<String>) -> Option<String> {
        if self.no_headline {
            return None;
        }
        self.custom_headline.clone().or(computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_headline_overrides_computed() {
        let options = ModelOptions {
            custom_headline: Some("Untersuchung".to_owned()),
            ..ModelOptions::default()
        };
        assert_eq!(
            options.headline_for(Some("Berechnet".to_owned())),
            Some("Untersuchung".to_owned())
        );
    }

    #[test]
    fn no_headline_wins_over_custom() {
        let options = ModelOptions {
            custom_headline: Some("Untersuchung".to_owned()),
            no_headline: true,
            ..ModelOptions::default()
        };
        assert_eq!(options.headline_for(Some("Berechnet".to_owned())), None);
    }

    #[test]
    fn defaults_keep_computed_headline() {
        let options = ModelOptions::default();
        assert_eq!(
            options.headline_for(Some("Berechnet".to_owned())),
            Some("Berechnet".to_owned())
        );
    }
}
