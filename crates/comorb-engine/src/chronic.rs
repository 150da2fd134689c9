//! Chronic condition indicator classification over ICD-9-CM.
//!
//! Each extracted code resolves to the first table row whose code starts
//! with it. A chronic row flags its body system; non-chronic rows flag
//! nothing.

use comorb_codes::{CodingSystem, CodingSystemRules, Icd9Cm, tokenize};
use comorb_standards::{BODY_SYSTEM_LABELS, BodySystem, ChronicRow, ChronicTable};
use serde::Serialize;

use crate::classifier::Classifier;
use crate::logging::redact_value;
use crate::result::Classification;

/// Outcome of looking a single code up in the chronic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChronicLookup {
    pub body_system: BodySystem,
    pub chronic: bool,
}

impl From<&ChronicRow> for ChronicLookup {
    fn from(row: &ChronicRow) -> Self {
        Self {
            body_system: row.body_system,
            chronic: row.chronic,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChronicClassifier {
    table: ChronicTable,
    categories: Vec<String>,
}

impl ChronicClassifier {
    pub fn new(table: ChronicTable) -> Self {
        Self {
            table,
            categories: BODY_SYSTEM_LABELS.map(String::from).to_vec(),
        }
    }

    pub fn table(&self) -> &ChronicTable {
        &self.table
    }

    /// The row a single code resolves to, if any.
    ///
    /// ```
    /// use comorb_engine::ChronicClassifier;
    /// use comorb_standards::{ReferenceConfig, load_cci};
    ///
    /// let classifier = ChronicClassifier::new(load_cci(&ReferenceConfig::embedded()).unwrap());
    /// let hit = classifier.lookup("428").unwrap();
    /// assert!(hit.chronic);
    /// assert_eq!(hit.body_system.id(), 7);
    /// ```
    pub fn lookup(&self, code: &str) -> Option<ChronicLookup> {
        self.table.lookup_prefix(code).map(ChronicLookup::from)
    }

    /// Whether any code in the input resolves to a chronic row.
    pub fn classify_chronic(&self, input: &str) -> bool {
        self.matched_rows(input).any(|row| row.chronic)
    }

    fn matched_rows<'a>(&'a self, input: &str) -> impl Iterator<Item = &'a ChronicRow> + 'a {
        tokenize(&Icd9Cm, input).into_iter().filter_map(|token| {
            let row = self.table.lookup_prefix(&token.key());
            if row.is_none() {
                tracing::debug!(code = redact_value(token.as_str()), "code not in table");
            }
            row
        })
    }
}

impl Classifier for ChronicClassifier {
    fn system(&self) -> CodingSystem {
        Icd9Cm.system()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn classify(&self, input: &str) -> Classification<'_> {
        let mut flags = vec![false; BodySystem::COUNT];
        for row in self.matched_rows(input).filter(|row| row.chronic) {
            flags[row.body_system.index()] = true;
        }
        Classification::new(&self.categories, flags)
    }
}

#[cfg(test)]
mod tests {
    use comorb_standards::{ReferenceConfig, load_cci};

    use super::*;

    fn cci() -> ChronicClassifier {
        ChronicClassifier::new(load_cci(&ReferenceConfig::embedded()).expect("embedded table"))
    }

    #[test]
    fn body_systems_are_the_categories() {
        let classifier = cci();
        assert_eq!(classifier.categories().len(), 18);
        assert_eq!(classifier.system(), CodingSystem::Icd9Cm);
    }

    #[test]
    fn lookup_resolves_prefix_and_chronic_bit() {
        let classifier = cci();
        let heart = classifier.lookup("4280").expect("4280 is listed");
        assert!(heart.chronic);
        assert_eq!(heart.body_system.id(), 7);
        assert_eq!(classifier.lookup("428"), Some(heart));

        let neoplasm = classifier.lookup("1611").expect("1611 is listed");
        assert!(neoplasm.chronic);
        assert_eq!(neoplasm.body_system.id(), 2);

        let cholera = classifier.lookup("0010").expect("0010 is listed");
        assert!(!cholera.chronic);
        assert_eq!(cholera.body_system.id(), 1);
    }

    #[test]
    fn only_chronic_rows_flag_their_body_system() {
        let classifier = cci();
        let result = classifier.classify("4280|4280,1611, 1, 0010");
        assert_eq!(result.sum(), 2);
        assert!(result.flags()[BodySystem::new(7).expect("valid id").index()]);
        assert_eq!(classifier.classify("0010").sum(), 0);
    }

    #[test]
    fn chronic_bit_follows_matched_rows() {
        let classifier = cci();
        assert!(classifier.classify_chronic("428.0"));
        assert!(!classifier.classify_chronic("0010"));
        assert!(!classifier.classify_chronic(""));
    }

    #[test]
    fn label_names_the_body_system() {
        let classifier = cci();
        assert_eq!(
            classifier.label("428.0").as_deref(),
            Some("Diseases of the circulatory system")
        );
        assert_eq!(classifier.label(""), None);
    }
}
