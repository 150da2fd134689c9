//! Comorbidity reference tables, embedded data and loaders.
//!
//! This crate provides:
//!
//! - **Range tables** ([`ReferenceTable`]): Quan Elixhauser categories for
//!   ICD-9-CM and ICD-10, one reference expression per category
//! - **Keyed tables** ([`KeyedTable`]): the CMR v2022 wide format, one row per
//!   ICD-10-CM code
//! - **Chronic tables** ([`ChronicTable`]): the CCI 2015 indicator with body
//!   systems
//! - **Configuration** ([`ReferenceConfig`]) selecting embedded data or files
//!   on disk
//!
//! # Example
//!
//! ```
//! use comorb_standards::{ReferenceConfig, ReferenceSet};
//!
//! let set = ReferenceSet::load(&ReferenceConfig::embedded()).unwrap();
//! assert_eq!(set.icd10_elixhauser.labels().nth(21), Some("Coagulopathy"));
//! ```

pub mod chronic_table;
pub mod config;
mod csv_utils;
pub mod embedded;
pub mod error;
pub mod keyed_table;
pub mod range_table;
pub mod registry;

pub use chronic_table::{BODY_SYSTEM_LABELS, BodySystem, ChronicRow, ChronicTable};
pub use config::{REFERENCE_DIR_ENV_VAR, ReferenceConfig, ReferenceFiles, ReferenceKind};
pub use error::{Result, TableError};
pub use keyed_table::{KeyedTable, code_key};
pub use range_table::{ReferenceEntry, ReferenceTable};
pub use registry::{
    ReferenceSet, load_cci, load_cmr, load_icd9_elixhauser, load_icd10_elixhauser,
};
