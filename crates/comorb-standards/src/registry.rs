//! Loading of the full reference set.

use comorb_codes::{CodingSystem, Icd9Cm, Icd10Cm};

use crate::chronic_table::ChronicTable;
use crate::config::{ReferenceConfig, ReferenceKind};
use crate::error::Result;
use crate::keyed_table::KeyedTable;
use crate::range_table::ReferenceTable;

/// Load the ICD-9-CM Elixhauser range table.
pub fn load_icd9_elixhauser(config: &ReferenceConfig) -> Result<ReferenceTable> {
    let (file, content) = config.read(ReferenceKind::Icd9Elixhauser)?;
    ReferenceTable::from_csv_str(&Icd9Cm, &content, &file)
}

/// Load the ICD-10 Elixhauser range table.
pub fn load_icd10_elixhauser(config: &ReferenceConfig) -> Result<ReferenceTable> {
    let (file, content) = config.read(ReferenceKind::Icd10Elixhauser)?;
    ReferenceTable::from_csv_str(&Icd10Cm, &content, &file)
}

/// Load the CMR v2022 keyed table.
pub fn load_cmr(config: &ReferenceConfig) -> Result<KeyedTable> {
    let (file, content) = config.read(ReferenceKind::Cmr)?;
    KeyedTable::from_tsv_str(CodingSystem::Icd10Cm, &content, &file)
}

/// Load the CCI 2015 chronic condition table.
pub fn load_cci(config: &ReferenceConfig) -> Result<ChronicTable> {
    let (file, content) = config.read(ReferenceKind::Cci)?;
    ChronicTable::from_csv_str(&content, &file)
}

/// Every reference table, loaded together.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    pub icd9_elixhauser: ReferenceTable,
    pub icd10_elixhauser: ReferenceTable,
    pub cmr: KeyedTable,
    pub cci: ChronicTable,
}

impl ReferenceSet {
    /// Load every table with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the first table that fails to load.
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let set = Self {
            icd9_elixhauser: load_icd9_elixhauser(config)?,
            icd10_elixhauser: load_icd10_elixhauser(config)?,
            cmr: load_cmr(config)?,
            cci: load_cci(config)?,
        };
        tracing::info!(
            embedded = config.reference_dir.is_none(),
            "reference set loaded"
        );
        Ok(set)
    }

    /// Load every table from the embedded data.
    pub fn load_embedded() -> Result<Self> {
        Self::load(&ReferenceConfig::embedded())
    }
}
