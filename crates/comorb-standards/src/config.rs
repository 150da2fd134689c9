//! Reference data configuration.
//!
//! Without a reference directory every table comes from the embedded data.
//! With one, each table is read from `<reference_dir>/<file name>`.
//!
//! ```toml
//! reference_dir = "/data/comorbidity"
//!
//! [files]
//! cmr = "CMR-Reference-File-v2022-1.tsv"
//! ```

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::csv_utils::{file_label, read_file};
use crate::embedded;
use crate::error::{Result, TableError};

/// Environment variable pointing at a directory of reference files.
pub const REFERENCE_DIR_ENV_VAR: &str = "COMORB_REFERENCE_DIR";

/// The reference tables known to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// ICD-9-CM Elixhauser range table.
    Icd9Elixhauser,
    /// ICD-10 Elixhauser range table.
    Icd10Elixhauser,
    /// CMR v2022 wide-format table.
    Cmr,
    /// CCI 2015 chronic condition table.
    Cci,
}

impl ReferenceKind {
    /// Default file name of this table.
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::Icd9Elixhauser => embedded::ICD9_ELIXHAUSER_FILE,
            Self::Icd10Elixhauser => embedded::ICD10_ELIXHAUSER_FILE,
            Self::Cmr => embedded::CMR_V2022_FILE,
            Self::Cci => embedded::CCI_2015_FILE,
        }
    }

    /// Embedded content of this table.
    pub const fn embedded(&self) -> &'static str {
        match self {
            Self::Icd9Elixhauser => embedded::ICD9_ELIXHAUSER,
            Self::Icd10Elixhauser => embedded::ICD10_ELIXHAUSER,
            Self::Cmr => embedded::CMR_V2022,
            Self::Cci => embedded::CCI_2015,
        }
    }

    /// All tables.
    pub const fn all() -> &'static [ReferenceKind] {
        &[
            Self::Icd9Elixhauser,
            Self::Icd10Elixhauser,
            Self::Cmr,
            Self::Cci,
        ]
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Icd9Elixhauser => "ICD-9-CM Elixhauser",
            Self::Icd10Elixhauser => "ICD-10 Elixhauser",
            Self::Cmr => "CMR v2022",
            Self::Cci => "CCI 2015",
        };
        f.write_str(name)
    }
}

/// File names of the reference tables inside the reference directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceFiles {
    pub icd9_elixhauser: String,
    pub icd10_elixhauser: String,
    pub cmr: String,
    pub cci: String,
}

impl Default for ReferenceFiles {
    fn default() -> Self {
        Self {
            icd9_elixhauser: ReferenceKind::Icd9Elixhauser.default_file_name().to_string(),
            icd10_elixhauser: ReferenceKind::Icd10Elixhauser.default_file_name().to_string(),
            cmr: ReferenceKind::Cmr.default_file_name().to_string(),
            cci: ReferenceKind::Cci.default_file_name().to_string(),
        }
    }
}

impl ReferenceFiles {
    /// Configured file name for a table.
    pub fn file_name(&self, kind: ReferenceKind) -> &str {
        match kind {
            ReferenceKind::Icd9Elixhauser => &self.icd9_elixhauser,
            ReferenceKind::Icd10Elixhauser => &self.icd10_elixhauser,
            ReferenceKind::Cmr => &self.cmr,
            ReferenceKind::Cci => &self.cci,
        }
    }
}

/// Configuration for loading reference tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Directory holding reference files. `None` selects the embedded data.
    pub reference_dir: Option<PathBuf>,
    /// Per-table file names inside `reference_dir`.
    pub files: ReferenceFiles,
}

impl ReferenceConfig {
    /// Config that uses only the embedded data.
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Read every table from `dir`.
    pub fn with_reference_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reference_dir = Some(dir.into());
        self
    }

    /// Override the file name of one table.
    pub fn with_file_name(mut self, kind: ReferenceKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            ReferenceKind::Icd9Elixhauser => self.files.icd9_elixhauser = name,
            ReferenceKind::Icd10Elixhauser => self.files.icd10_elixhauser = name,
            ReferenceKind::Cmr => self.files.cmr = name,
            ReferenceKind::Cci => self.files.cci = name,
        }
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_toml_str(&content).map_err(|source| TableError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Embedded data, unless `COMORB_REFERENCE_DIR` names a directory.
    pub fn from_env() -> Self {
        match std::env::var_os(REFERENCE_DIR_ENV_VAR) {
            Some(dir) if !dir.is_empty() => Self::default().with_reference_dir(dir),
            _ => Self::default(),
        }
    }

    /// Path a table is read from, or `None` for embedded data.
    pub fn path_for(&self, kind: ReferenceKind) -> Option<PathBuf> {
        self.reference_dir
            .as_ref()
            .map(|dir| dir.join(self.files.file_name(kind)))
    }

    /// Content of a table together with the name used to report it.
    pub fn read(&self, kind: ReferenceKind) -> Result<(String, Cow<'static, str>)> {
        match self.path_for(kind) {
            Some(path) => {
                tracing::debug!(table = %kind, path = %path.display(), "reading reference file");
                let content = read_file(&path)?;
                Ok((file_label(&path), Cow::Owned(content)))
            }
            None => Ok((
                kind.default_file_name().to_string(),
                Cow::Borrowed(kind.embedded()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reads_embedded_data() {
        let config = ReferenceConfig::embedded();
        assert_eq!(config.path_for(ReferenceKind::Cci), None);

        let (name, content) = config.read(ReferenceKind::Cci).expect("embedded");
        assert_eq!(name, "cci2015.csv");
        assert!(matches!(content, Cow::Borrowed(_)));
    }

    #[test]
    fn toml_overrides_single_file_name() {
        let config = ReferenceConfig::from_toml_str(
            r#"
            reference_dir = "/data/ref"

            [files]
            cmr = "CMR-Reference-File-v2022-1.tsv"
            "#,
        )
        .expect("valid toml");

        assert_eq!(
            config.path_for(ReferenceKind::Cmr),
            Some(PathBuf::from("/data/ref/CMR-Reference-File-v2022-1.tsv"))
        );
        assert_eq!(
            config.path_for(ReferenceKind::Cci),
            Some(PathBuf::from("/data/ref/cci2015.csv"))
        );
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(ReferenceConfig::from_toml_str("reference_directory = \"x\"").is_err());
    }

    #[test]
    fn builder_matches_toml() {
        let built = ReferenceConfig::embedded()
            .with_reference_dir("/data/ref")
            .with_file_name(ReferenceKind::Cmr, "cmr.tsv");
        let parsed = ReferenceConfig::from_toml_str(
            "reference_dir = \"/data/ref\"\n[files]\ncmr = \"cmr.tsv\"\n",
        )
        .expect("valid toml");
        assert_eq!(built, parsed);
    }
}
