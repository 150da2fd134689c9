//! Wide-format code to category tables.
//!
//! One row per code, one `0`/`1` column per category. Lookup is by the code
//! with its decimal point removed (`E11.9` is stored as `E119`).

use std::collections::HashMap;
use std::path::Path;

use comorb_codes::{CodingSystem, ensure_verified};

use crate::csv_utils::{column_index, file_label, headers, read_file, reader, skip_title_line};
use crate::error::{Result, TableError};

/// Header of the code column.
pub const CODE_COLUMN: &str = "ICD-10-CM Diagnosis";

/// Header of the code description column.
pub const DESCRIPTION_COLUMN: &str = "ICD-10-CM Code Description";

/// Header of the per-row category count column.
pub const COUNT_COLUMN: &str = "# Comorbidities";

/// Columns that never become categories.
const AUXILIARY_COLUMNS: [&str; 3] = [CODE_COLUMN, DESCRIPTION_COLUMN, COUNT_COLUMN];

/// Canonical lookup key: decimal points and whitespace removed, uppercase.
pub fn code_key(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// A direct-lookup table from code key to category flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedTable {
    system: CodingSystem,
    source: String,
    categories: Vec<String>,
    rows: HashMap<String, Vec<bool>>,
}

impl KeyedTable {
    /// Parse a tab-separated table, optionally preceded by a title line.
    pub fn from_tsv_str(system: CodingSystem, content: &str, file: &str) -> Result<Self> {
        ensure_verified()?;

        let body = skip_title_line(content, CODE_COLUMN);
        let mut reader = reader(body, b'\t', b'"');
        let headers = headers(&mut reader, file)?;

        let code_idx = column_index(&headers, CODE_COLUMN, file)?;
        let count_idx = column_index(&headers, COUNT_COLUMN, file).ok();
        let category_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                !AUXILIARY_COLUMNS
                    .iter()
                    .any(|aux| name.eq_ignore_ascii_case(aux))
            })
            .map(|(idx, name)| (idx, name.to_string()))
            .collect();

        let mut rows = HashMap::new();
        for (record_idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| TableError::csv(file, &e))?;
            let invalid = |field: &str, value: &str| TableError::InvalidValue {
                file: file.to_string(),
                record: record_idx + 1,
                field: field.to_string(),
                value: value.to_string(),
            };

            let code = record.get(code_idx).unwrap_or_default();
            let key = code_key(code);
            if key.is_empty() {
                return Err(invalid(CODE_COLUMN, code));
            }

            let mut flags = Vec::with_capacity(category_columns.len());
            for (idx, name) in &category_columns {
                let cell = record.get(*idx).unwrap_or_default();
                flags.push(match cell {
                    "0" => false,
                    "1" => true,
                    other => return Err(invalid(name, other)),
                });
            }

            if let Some(count_idx) = count_idx {
                let declared = record.get(count_idx).unwrap_or_default();
                let flagged = flags.iter().filter(|f| **f).count();
                if declared.parse::<usize>().ok() != Some(flagged) {
                    tracing::warn!(
                        file = %file,
                        record = record_idx + 1,
                        declared,
                        flagged,
                        "category count column disagrees with flags"
                    );
                }
            }

            if rows.contains_key(&key) {
                tracing::warn!(file = %file, record = record_idx + 1, "duplicate code row ignored");
                continue;
            }
            rows.insert(key, flags);
        }

        if rows.is_empty() {
            return Err(TableError::EmptyTable {
                file: file.to_string(),
            });
        }

        tracing::info!(
            file = %file,
            %system,
            codes = rows.len(),
            categories = category_columns.len(),
            "loaded keyed reference table"
        );

        Ok(Self {
            system,
            source: file.to_string(),
            categories: category_columns.into_iter().map(|(_, name)| name).collect(),
            rows,
        })
    }

    /// Load a table from a file on disk.
    pub fn from_path(system: CodingSystem, path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_tsv_str(system, &content, &file_label(path))
    }

    /// Flags for a code, by any spelling of its key (`E11.9` or `E119`).
    pub fn lookup(&self, code: &str) -> Option<&[bool]> {
        self.rows.get(&code_key(code)).map(Vec::as_slice)
    }

    pub fn system(&self) -> CodingSystem {
        self.system
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Category names in column order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
