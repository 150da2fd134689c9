//! Embedded reference data.
//!
//! All reference tables are embedded at compile time using `include_str!()`,
//! so the default classifiers need no file I/O.
//!
//! # Structure
//!
//! - Quan enhanced ICD-9-CM Elixhauser ranges
//! - Quan ICD-10 Elixhauser ranges
//! - Elixhauser Comorbidity Software Refined for ICD-10-CM, v2022.1 (sample)
//! - Chronic Condition Indicator for ICD-9-CM, 2015 (sample)
//!
//! The two samples keep the published file layout, so the complete files can
//! be loaded from disk in their place (see [`crate::config::ReferenceConfig`]).

// =============================================================================
// Elixhauser range tables
// =============================================================================

/// File name of the ICD-9-CM Elixhauser range table.
pub const ICD9_ELIXHAUSER_FILE: &str = "icd9cm_elixhauser.csv";

/// Quan enhanced ICD-9-CM Elixhauser ranges.
pub const ICD9_ELIXHAUSER: &str = include_str!("../data/icd9cm_elixhauser.csv");

/// File name of the ICD-10 Elixhauser range table.
pub const ICD10_ELIXHAUSER_FILE: &str = "icd10_elixhauser.csv";

/// Quan ICD-10 Elixhauser ranges.
pub const ICD10_ELIXHAUSER: &str = include_str!("../data/icd10_elixhauser.csv");

// =============================================================================
// Keyed and chronic tables
// =============================================================================

/// File name of the CMR v2022 wide-format table.
pub const CMR_V2022_FILE: &str = "cmr_reference_v2022.tsv";

/// CMR v2022 wide-format code to category table (tab separated).
pub const CMR_V2022: &str = include_str!("../data/cmr_reference_v2022.tsv");

/// File name of the CCI 2015 table.
pub const CCI_2015_FILE: &str = "cci2015.csv";

/// CCI 2015 chronic condition indicator table (single-quoted CSV).
pub const CCI_2015: &str = include_str!("../data/cci2015.csv");
