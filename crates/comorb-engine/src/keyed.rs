//! Direct-lookup classification against a wide indicator table.

use comorb_codes::{CodingSystem, CodingSystemRules, tokenize};
use comorb_standards::KeyedTable;

use crate::classifier::Classifier;
use crate::error::{EngineError, Result};
use crate::logging::redact_value;
use crate::result::Classification;

/// Looks each extracted code up by key and ORs the rows it finds.
///
/// Codes absent from the table contribute nothing.
#[derive(Debug, Clone)]
pub struct KeyedClassifier<R> {
    rules: R,
    table: KeyedTable,
}

impl<R: CodingSystemRules> KeyedClassifier<R> {
    /// # Errors
    ///
    /// Returns [`EngineError::SystemMismatch`] if the table was built for a
    /// different coding system.
    pub fn new(rules: R, table: KeyedTable) -> Result<Self> {
        if table.system() != rules.system() {
            return Err(EngineError::SystemMismatch {
                table: table.source().to_string(),
                expected: rules.system(),
                actual: table.system(),
            });
        }
        Ok(Self { rules, table })
    }

    pub fn table(&self) -> &KeyedTable {
        &self.table
    }
}

impl<R: CodingSystemRules> Classifier for KeyedClassifier<R> {
    fn system(&self) -> CodingSystem {
        self.rules.system()
    }

    fn categories(&self) -> &[String] {
        self.table.categories()
    }

    fn classify(&self, input: &str) -> Classification<'_> {
        let mut flags = vec![false; self.table.categories().len()];
        for token in &tokenize(&self.rules, input) {
            match self.table.lookup(&token.key()) {
                Some(row) => {
                    for (flag, hit) in flags.iter_mut().zip(row) {
                        *flag |= *hit;
                    }
                }
                None => {
                    tracing::debug!(code = redact_value(token.as_str()), "code not in table");
                }
            }
        }
        Classification::new(self.table.categories(), flags)
    }
}
