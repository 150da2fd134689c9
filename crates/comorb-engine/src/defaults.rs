//! Process-wide classifiers over the embedded reference data.
//!
//! The embedded tables are parsed once, on first use, and shared read-only
//! afterwards.
//!
//! The embedded Elixhauser tables are complete. The embedded CMR v2022 and
//! CCI tables are samples of a few dozen codes each, so most real codes
//! classify as all zero through [`cmr`] and [`cci`]. To classify against the
//! published files, point `COMORB_REFERENCE_DIR` at them and build with
//! `Classifiers::load(&ReferenceConfig::from_env())`.

use std::sync::OnceLock;

use comorb_codes::{Icd9Cm, Icd10Cm};
use comorb_standards::{ReferenceConfig, ReferenceSet};

use crate::chronic::ChronicClassifier;
use crate::classifier::Classifier;
use crate::error::{EngineError, Result};
use crate::keyed::KeyedClassifier;
use crate::range::RangeClassifier;
use crate::result::{Classification, ClassificationTable};

static EMBEDDED: OnceLock<std::result::Result<Classifiers, String>> = OnceLock::new();

/// One classifier per reference table.
#[derive(Debug, Clone)]
pub struct Classifiers {
    pub icd9_elixhauser: RangeClassifier<Icd9Cm>,
    pub icd10_elixhauser: RangeClassifier<Icd10Cm>,
    pub cmr: KeyedClassifier<Icd10Cm>,
    pub cci: ChronicClassifier,
}

impl Classifiers {
    pub fn from_reference_set(set: ReferenceSet) -> Result<Self> {
        Ok(Self {
            icd9_elixhauser: RangeClassifier::new(Icd9Cm, set.icd9_elixhauser)?,
            icd10_elixhauser: RangeClassifier::new(Icd10Cm, set.icd10_elixhauser)?,
            cmr: KeyedClassifier::new(Icd10Cm, set.cmr)?,
            cci: ChronicClassifier::new(set.cci),
        })
    }

    /// Load every table with `config` and build the classifiers.
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        Self::from_reference_set(ReferenceSet::load(config)?)
    }
}

/// The shared classifiers over the embedded data.
///
/// The CMR and CCI tables behind these are samples. See the module docs and
/// [`ReferenceConfig::from_env`] for loading the published files.
///
/// # Errors
///
/// Returns [`EngineError::Embedded`] if the embedded data fails to load. The
/// failure is cached, so every later call reports the same error.
pub fn embedded() -> Result<&'static Classifiers> {
    EMBEDDED
        .get_or_init(|| {
            Classifiers::load(&ReferenceConfig::embedded()).map_err(|err| err.to_string())
        })
        .as_ref()
        .map_err(|message| EngineError::Embedded {
            message: message.clone(),
        })
}

/// Elixhauser flags for ICD-9-CM text.
pub fn icd9_elixhauser(input: &str) -> Result<Classification<'static>> {
    Ok(embedded()?.icd9_elixhauser.classify(input))
}

/// Elixhauser flags for ICD-10-CM text.
pub fn icd10_elixhauser(input: &str) -> Result<Classification<'static>> {
    Ok(embedded()?.icd10_elixhauser.classify(input))
}

/// CMR v2022 flags for ICD-10-CM text.
///
/// Uses the embedded sample table. Codes outside the sample yield all zeros.
pub fn cmr(input: &str) -> Result<Classification<'static>> {
    Ok(embedded()?.cmr.classify(input))
}

/// Chronic body-system flags for ICD-9-CM text.
///
/// Uses the embedded sample table. Codes outside the sample yield all zeros.
pub fn cci(input: &str) -> Result<Classification<'static>> {
    Ok(embedded()?.cci.classify(input))
}

/// ICD-9-CM Elixhauser flags for many inputs.
pub fn icd9_elixhauser_all<S: AsRef<str> + Sync>(inputs: &[S]) -> Result<ClassificationTable> {
    Ok(embedded()?.icd9_elixhauser.classify_all(inputs))
}

/// ICD-10-CM Elixhauser flags for many inputs.
pub fn icd10_elixhauser_all<S: AsRef<str> + Sync>(inputs: &[S]) -> Result<ClassificationTable> {
    Ok(embedded()?.icd10_elixhauser.classify_all(inputs))
}

/// CMR v2022 flags for many inputs, against the embedded sample table.
pub fn cmr_all<S: AsRef<str> + Sync>(inputs: &[S]) -> Result<ClassificationTable> {
    Ok(embedded()?.cmr.classify_all(inputs))
}

/// Chronic body-system flags for many inputs, against the embedded sample
/// table.
pub fn cci_all<S: AsRef<str> + Sync>(inputs: &[S]) -> Result<ClassificationTable> {
    Ok(embedded()?.cci.classify_all(inputs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_classifiers_are_shared() {
        let first = embedded().expect("embedded data loads");
        let second = embedded().expect("embedded data loads");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn convenience_functions_use_embedded_tables() {
        assert_eq!(icd9_elixhauser("344.1").expect("loads").sum(), 1);
        assert_eq!(icd10_elixhauser("").expect("loads").sum(), 0);
        assert_eq!(cmr("E11.9").expect("loads").get("DIAB_UNCX"), Some(true));
        assert_eq!(cci("428.0").expect("loads").sum(), 1);
    }

    #[test]
    fn codes_outside_the_embedded_samples_are_all_zero() {
        assert_eq!(cmr("E11.9").expect("loads").sum(), 1);
        assert_eq!(cmr("E11.40").expect("loads").sum(), 0);
        assert_eq!(cci("250.00").expect("loads").sum(), 1);
        assert_eq!(cci("250.02").expect("loads").sum(), 0);
    }

    #[test]
    fn batch_functions_keep_input_order() {
        let table = cci_all(&["", "428.0"]).expect("loads");
        assert_eq!(table.shape(), (2, 18));
        assert_eq!(table.row(0).map(|row| row.sum()), Some(0));
        assert_eq!(table.row(1).map(|row| row.sum()), Some(1));
        assert_eq!(cmr_all(&["N18.3"]).expect("loads").total(), 1);
        assert_eq!(icd9_elixhauser_all(&["344.1"]).expect("loads").total(), 1);
        assert_eq!(icd10_elixhauser_all::<&str>(&[]).expect("loads").len(), 0);
    }
}
