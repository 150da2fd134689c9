//! Range-based classification against Elixhauser reference expressions.

use comorb_codes::{CodingSystem, CodingSystemRules, tokenize_for_ranges};
use comorb_standards::ReferenceTable;

use crate::classifier::Classifier;
use crate::error::{EngineError, Result};
use crate::logging::redact_value;
use crate::result::Classification;

/// Flags a category when any extracted code falls inside one of its
/// reference expressions.
#[derive(Debug, Clone)]
pub struct RangeClassifier<R> {
    rules: R,
    table: ReferenceTable,
    categories: Vec<String>,
}

impl<R: CodingSystemRules> RangeClassifier<R> {
    /// Pair a coding system's rules with a reference table of the same system.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SystemMismatch`] if the table was built for a
    /// different coding system.
    pub fn new(rules: R, table: ReferenceTable) -> Result<Self> {
        if table.system() != rules.system() {
            return Err(EngineError::SystemMismatch {
                table: table.source().to_string(),
                expected: rules.system(),
                actual: table.system(),
            });
        }
        let categories = table.labels().map(String::from).collect();
        Ok(Self {
            rules,
            table,
            categories,
        })
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }
}

impl<R: CodingSystemRules> Classifier for RangeClassifier<R> {
    fn system(&self) -> CodingSystem {
        self.rules.system()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn classify(&self, input: &str) -> Classification<'_> {
        let tokens = tokenize_for_ranges(&self.rules, input);
        if tokens.is_empty() {
            return Classification::empty(&self.categories);
        }

        let flags = self
            .table
            .entries()
            .iter()
            .map(|entry| {
                tokens.iter().any(|token| {
                    let hit = entry.matches(&self.rules, token);
                    if hit {
                        tracing::debug!(
                            code = redact_value(token.as_str()),
                            category = %entry.label,
                            "code in range"
                        );
                    }
                    hit
                })
            })
            .collect();
        Classification::new(&self.categories, flags)
    }
}

#[cfg(test)]
mod tests {
    use comorb_codes::{Icd9Cm, Icd10Cm};
    use comorb_standards::{ReferenceConfig, load_icd9_elixhauser, load_icd10_elixhauser};

    use super::*;

    fn icd9() -> RangeClassifier<Icd9Cm> {
        let table = load_icd9_elixhauser(&ReferenceConfig::embedded()).expect("embedded table");
        RangeClassifier::new(Icd9Cm, table).expect("same system")
    }

    #[test]
    fn mismatched_system_is_rejected() {
        let table = load_icd9_elixhauser(&ReferenceConfig::embedded()).expect("embedded table");
        let err = RangeClassifier::new(Icd10Cm, table).unwrap_err();
        assert!(matches!(
            err,
            EngineError::SystemMismatch {
                expected: CodingSystem::Icd10Cm,
                actual: CodingSystem::Icd9Cm,
                ..
            }
        ));
    }

    #[test]
    fn categories_follow_table_order() {
        let classifier = icd9();
        assert_eq!(classifier.categories().len(), 31);
        assert_eq!(classifier.categories()[21], "Coagulopathy");
    }

    #[test]
    fn code_free_input_is_all_zero() {
        let classifier = icd9();
        for input in ["", "   ", "no codes here", "1"] {
            let result = classifier.classify(input);
            assert_eq!(result.len(), 31);
            assert_eq!(result.sum(), 0, "input {input:?}");
        }
    }

    #[test]
    fn icd10_seventh_character_codes_use_their_stem() {
        let table = load_icd10_elixhauser(&ReferenceConfig::embedded()).expect("embedded table");
        let classifier = RangeClassifier::new(Icd10Cm, table).expect("same system");
        assert_eq!(classifier.label("T51.0X1A").as_deref(), Some("Alcohol abuse"));
        assert_eq!(
            classifier.label("M05.79A").as_deref(),
            Some("Rheumatoid arthritis/ collagen vascular diseases")
        );
        assert_eq!(
            classifier.classify("T51.0X1A").flags(),
            classifier.classify("T51.0").flags()
        );
    }

    #[test]
    fn single_codes_flag_one_category() {
        let classifier = icd9();
        assert_eq!(classifier.classify("344.1").sum(), 1);
        assert_eq!(classifier.classify("287.3").sum(), 1);
        assert_eq!(classifier.classify("V45.1").sum(), 1);
    }
}
