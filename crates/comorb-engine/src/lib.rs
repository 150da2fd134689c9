//! Comorbidity classification of free-text diagnosis codes.
//!
//! A [`Classifier`] extracts codes from a string and maps them to a fixed,
//! ordered set of categories:
//!
//! - [`RangeClassifier`]: Elixhauser categories defined by reference range
//!   expressions (ICD-9-CM or ICD-10-CM)
//! - [`KeyedClassifier`]: the CMR v2022 wide table, looked up by code
//! - [`ChronicClassifier`]: the chronic condition indicator, reporting body
//!   systems
//!
//! Classification never fails. Input without a recognised code yields an
//! all-zero [`Classification`].
//!
//! # Example
//!
//! ```
//! use comorb_engine::{Classifier, defaults};
//!
//! let classifiers = defaults::embedded().unwrap();
//! let result = classifiers.icd10_elixhauser.classify("D69.1 F22.23");
//! assert_eq!(result.sum(), 2);
//! assert_eq!(result.label().as_deref(), Some("Coagulopathy | Psychoses"));
//! ```
//!
//! # Features
//!
//! - `parallel`: batch classification on the rayon thread pool
//! - `polars`: `ClassificationTable::to_dataframe`

pub mod batch;
pub mod chronic;
pub mod classifier;
pub mod defaults;
pub mod error;
pub mod keyed;
pub mod logging;
#[cfg(feature = "polars")]
mod polars_ext;
pub mod range;
pub mod result;

pub use batch::classify_all;
pub use chronic::{ChronicClassifier, ChronicLookup};
pub use classifier::Classifier;
pub use defaults::Classifiers;
pub use error::{EngineError, Result};
pub use keyed::KeyedClassifier;
pub use logging::{LogConfig, LogFormat, init_logging};
pub use range::RangeClassifier;
pub use result::{Classification, ClassificationTable, LABEL_SEPARATOR};
