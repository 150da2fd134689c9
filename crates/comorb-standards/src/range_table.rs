//! Range reference tables (one row per category).
//!
//! Each row pairs a category label with a reference expression such as
//! `"286.x, 287.1, 287.3-287.5"`. Expressions are parsed once at load time,
//! so a malformed expression fails the load instead of a later lookup.

use std::path::Path;

use comorb_codes::{
    CodeToken, CodingSystem, CodingSystemRules, RangeExpression, ensure_verified, parse_expression,
};
use serde::Serialize;

use crate::csv_utils::{column_index, file_label, headers, read_file, reader, strip_bom};
use crate::error::{Result, TableError};

/// Header of the category label column.
pub const LABEL_COLUMN: &str = "Comorbidities";

/// Header of the reference expression column for a coding system.
pub const fn expression_column(system: CodingSystem) -> &'static str {
    match system {
        CodingSystem::Icd9Cm => "Enhanced ICD-9-CM",
        CodingSystem::Icd10Cm => "ICD-10",
    }
}

/// One category and the clauses that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    /// Category label, single line and trimmed.
    pub label: String,
    /// The expression as written in the source.
    pub expression: String,
    /// Parsed clauses, OR-ed together.
    pub clauses: Vec<RangeExpression>,
}

impl ReferenceEntry {
    /// Whether any clause matches the token.
    pub fn matches<R: CodingSystemRules + ?Sized>(&self, rules: &R, token: &CodeToken) -> bool {
        self.clauses.iter().any(|clause| clause.matches(rules, token))
    }
}

/// An ordered set of categories for one coding system.
///
/// Entry order is the load order and fixes the column order of every
/// classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceTable {
    system: CodingSystem,
    source: String,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    /// Build a table from `(label, expression)` pairs from any tabular source.
    pub fn from_entries<R, I, L, E>(rules: &R, source: &str, rows: I) -> Result<Self>
    where
        R: CodingSystemRules + ?Sized,
        I: IntoIterator<Item = (L, E)>,
        L: AsRef<str>,
        E: AsRef<str>,
    {
        ensure_verified()?;

        let mut entries = Vec::new();
        for (record, (label, expression)) in rows.into_iter().enumerate() {
            let label = clean_label(label.as_ref());
            let expression = expression.as_ref().to_string();
            if label.is_empty() {
                return Err(TableError::InvalidValue {
                    file: source.to_string(),
                    record: record + 1,
                    field: LABEL_COLUMN.to_string(),
                    value: String::new(),
                });
            }

            let clauses = parse_expression(rules, &expression).map_err(|e| {
                TableError::InvalidExpression {
                    file: source.to_string(),
                    label: label.clone(),
                    source: e,
                }
            })?;
            if clauses.is_empty() {
                tracing::warn!(
                    file = %source,
                    %label,
                    "reference row has no codes and never matches"
                );
            }

            entries.push(ReferenceEntry {
                label,
                expression,
                clauses,
            });
        }

        if entries.is_empty() {
            return Err(TableError::EmptyTable {
                file: source.to_string(),
            });
        }

        tracing::info!(
            file = %source,
            system = %rules.system(),
            categories = entries.len(),
            "loaded range reference table"
        );

        Ok(Self {
            system: rules.system(),
            source: source.to_string(),
            entries,
        })
    }

    /// Parse a comma-separated table with `Comorbidities` and expression columns.
    pub fn from_csv_str<R: CodingSystemRules + ?Sized>(
        rules: &R,
        content: &str,
        file: &str,
    ) -> Result<Self> {
        let mut reader = reader(strip_bom(content), b',', b'"');
        let headers = headers(&mut reader, file)?;
        let label_idx = column_index(&headers, LABEL_COLUMN, file)?;
        let expression_idx = column_index(&headers, expression_column(rules.system()), file)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| TableError::csv(file, &e))?;
            let label = record.get(label_idx).unwrap_or_default().to_string();
            let expression = record.get(expression_idx).unwrap_or_default().to_string();
            rows.push((label, expression));
        }

        Self::from_entries(rules, file, rows)
    }

    /// Load a table from a file on disk.
    pub fn from_path<R: CodingSystemRules + ?Sized>(rules: &R, path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_csv_str(rules, &content, &file_label(path))
    }

    pub fn system(&self) -> CodingSystem {
        self.system
    }

    /// Name of the file the table was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Category labels in column order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Find an entry by its label, ignoring case.
    pub fn find(&self, label: &str) -> Option<&ReferenceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(label.trim()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Labels may span lines in the source file (`"Pulmonary circulation\nDisorders"`).
fn clean_label(raw: &str) -> String {
    raw.replace(['\r', '\n'], " ").trim().to_string()
}
