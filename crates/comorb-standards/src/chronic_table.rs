//! Chronic condition indicator (CCI) table.
//!
//! One row per ICD-9-CM code with an is-chronic indicator and one of 18 body
//! systems. A lookup key selects the first row, in table order, whose code
//! starts with the key.

use std::fmt;
use std::path::Path;

use comorb_codes::ensure_verified;
use serde::Serialize;

use crate::csv_utils::{column_index, file_label, headers, read_file, reader, skip_title_line};
use crate::error::{Result, TableError};

pub const CODE_COLUMN: &str = "ICD-9-CM CODE";
pub const DESCRIPTION_COLUMN: &str = "ICD-9-CM CODE DESCRIPTION";
/// Holds the is-chronic indicator (`0`/`1`).
pub const CATEGORY_COLUMN: &str = "CATEGORY DESCRIPTION";
pub const BODY_SYSTEM_COLUMN: &str = "BODY SYSTEM";

/// Body system labels, indexed by id - 1.
pub const BODY_SYSTEM_LABELS: [&str; 18] = [
    "Infectious and parasitic disease",
    "Neoplasms",
    "Endocrine, nutritional, and metabolic diseases and immunity disorders",
    "Diseases of blood and blood-forming organs",
    "Mental disorders",
    "Diseases of the nervous system and sense organs",
    "Diseases of the circulatory system",
    "Diseases of the respiratory system",
    "Diseases of the digestive system",
    "Diseases of the genitourinary system",
    "Complications of pregnancy, childbirth, and the puerperium",
    "Diseases of the skin and subcutaneous tissue",
    "Diseases of the musculoskeletal system",
    "Congenital anomalies",
    "Certain conditions originating in the perinatal period",
    "Symptoms, signs, and ill-defined conditions",
    "Injury and poisoning",
    "Factors influencing health status and contact with health services",
];

/// A body system id in `1..=18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodySystem(u8);

impl BodySystem {
    /// Number of body systems.
    pub const COUNT: usize = BODY_SYSTEM_LABELS.len();

    pub fn new(id: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&usize::from(id)).then_some(Self(id))
    }

    /// Body system at a zero-based column index.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index + 1).ok().and_then(Self::new)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// Zero-based column index.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    pub fn label(self) -> &'static str {
        BODY_SYSTEM_LABELS[self.index()]
    }

    /// All body systems in id order.
    pub fn all() -> impl Iterator<Item = BodySystem> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }
}

impl fmt::Display for BodySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the chronic condition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChronicRow {
    /// Code with every character outside `[0-9A-Z]` removed (`4280`).
    pub code: String,
    pub description: String,
    pub chronic: bool,
    pub body_system: BodySystem,
}

/// Keep only `[0-9A-Z]`, uppercased.
pub fn clean_code(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        .collect()
}

/// Chronic condition rows with a sorted prefix index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronicTable {
    source: String,
    rows: Vec<ChronicRow>,
    /// Row positions ordered by code.
    by_code: Vec<usize>,
}

impl ChronicTable {
    /// Build a table from rows in table order.
    pub fn from_rows(source: &str, rows: Vec<ChronicRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(TableError::EmptyTable {
                file: source.to_string(),
            });
        }

        let mut by_code: Vec<usize> = (0..rows.len()).collect();
        by_code.sort_by(|a, b| rows[*a].code.cmp(&rows[*b].code).then(a.cmp(b)));

        Ok(Self {
            source: source.to_string(),
            rows,
            by_code,
        })
    }

    /// Parse the single-quoted CSV layout, optionally preceded by a title line.
    pub fn from_csv_str(content: &str, file: &str) -> Result<Self> {
        ensure_verified()?;

        let body = skip_title_line(content, CODE_COLUMN);
        let mut reader = reader(body, b',', b'\'');
        let headers = headers(&mut reader, file)?;

        let code_idx = column_index(&headers, CODE_COLUMN, file)?;
        let description_idx = column_index(&headers, DESCRIPTION_COLUMN, file)?;
        let category_idx = column_index(&headers, CATEGORY_COLUMN, file)?;
        let body_idx = column_index(&headers, BODY_SYSTEM_COLUMN, file)?;

        let mut rows = Vec::new();
        for (record_idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| TableError::csv(file, &e))?;
            let invalid = |field: &str, value: &str| TableError::InvalidValue {
                file: file.to_string(),
                record: record_idx + 1,
                field: field.to_string(),
                value: value.to_string(),
            };

            let raw_code = record.get(code_idx).unwrap_or_default();
            let code = clean_code(raw_code);
            if code.is_empty() {
                return Err(invalid(CODE_COLUMN, raw_code));
            }

            let indicator = record.get(category_idx).unwrap_or_default();
            let chronic = match digits(indicator).as_deref() {
                Some("0") => false,
                Some("1") => true,
                _ => return Err(invalid(CATEGORY_COLUMN, indicator)),
            };

            let raw_body = record.get(body_idx).unwrap_or_default();
            let Some(body_system) = digits(raw_body)
                .and_then(|d| d.parse::<u8>().ok())
                .and_then(BodySystem::new)
            else {
                tracing::warn!(
                    file = %file,
                    record = record_idx + 1,
                    value = raw_body,
                    "unknown body system, row skipped"
                );
                continue;
            };

            rows.push(ChronicRow {
                code,
                description: record.get(description_idx).unwrap_or_default().to_string(),
                chronic,
                body_system,
            });
        }

        let table = Self::from_rows(file, rows)?;
        tracing::info!(
            file = %file,
            codes = table.len(),
            chronic = table.rows.iter().filter(|r| r.chronic).count(),
            "loaded chronic condition table"
        );
        Ok(table)
    }

    /// Load a table from a file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_csv_str(&content, &file_label(path))
    }

    /// First row in table order whose code starts with the cleaned key.
    ///
    /// An empty key never matches.
    pub fn lookup_prefix(&self, key: &str) -> Option<&ChronicRow> {
        let key = clean_code(key);
        if key.is_empty() {
            return None;
        }

        let start = self
            .by_code
            .partition_point(|&i| self.rows[i].code.as_str() < key.as_str());
        self.by_code[start..]
            .iter()
            .take_while(|&&i| self.rows[i].code.starts_with(&key))
            .min()
            .map(|&i| &self.rows[i])
    }

    pub fn rows(&self) -> &[ChronicRow] {
        &self.rows
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn digits(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}
