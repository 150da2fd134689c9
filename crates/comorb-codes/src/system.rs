//! Supported clinical coding systems.

use serde::{Deserialize, Serialize};

/// A diagnosis coding system a token can be validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CodingSystem {
    /// ICD-9-CM diagnosis codes (e.g. `428.0`, `V45.1`).
    Icd9Cm,
    /// ICD-10-CM diagnosis codes (e.g. `E11.9`, `U07.1`).
    Icd10Cm,
}

impl CodingSystem {
    /// Display name of the coding system.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Icd9Cm => "ICD-9-CM",
            Self::Icd10Cm => "ICD-10-CM",
        }
    }

    /// All supported coding systems.
    pub const fn all() -> &'static [CodingSystem] {
        &[Self::Icd9Cm, Self::Icd10Cm]
    }
}

impl std::fmt::Display for CodingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
