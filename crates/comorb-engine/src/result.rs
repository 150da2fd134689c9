//! Classification results.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Separator between labels when several categories are flagged.
pub const LABEL_SEPARATOR: &str = " | ";

/// A 0/1 flag per category, in the category order of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    categories: &'a [String],
    flags: Vec<bool>,
}

impl<'a> Classification<'a> {
    /// Pair flags with their categories.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn new(categories: &'a [String], flags: Vec<bool>) -> Self {
        assert_eq!(
            categories.len(),
            flags.len(),
            "one flag per category is required"
        );
        Self { categories, flags }
    }

    /// The all-zero result.
    pub fn empty(categories: &'a [String]) -> Self {
        Self {
            categories,
            flags: vec![false; categories.len()],
        }
    }

    pub fn categories(&self) -> &'a [String] {
        self.categories
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Flags as `0`/`1` values.
    pub fn to_vec(&self) -> Vec<u8> {
        self.flags.iter().map(|f| u8::from(*f)).collect()
    }

    pub fn into_flags(self) -> Vec<bool> {
        self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of flagged categories.
    pub fn sum(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Whether any category is flagged.
    pub fn any(&self) -> bool {
        self.flags.contains(&true)
    }

    /// Flag of a category by label, ignoring case.
    pub fn get(&self, category: &str) -> Option<bool> {
        self.categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(category))
            .map(|idx| self.flags[idx])
    }

    /// `(category, flag)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, bool)> + '_ {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.flags.iter().copied())
    }

    /// Labels of the flagged categories.
    pub fn flagged(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.iter()
            .filter_map(|(category, flag)| flag.then_some(category))
    }

    /// The flagged labels joined with [`LABEL_SEPARATOR`], or `None`.
    pub fn label(&self) -> Option<String> {
        let labels: Vec<&str> = self.flagged().collect();
        (!labels.is_empty()).then(|| labels.join(LABEL_SEPARATOR))
    }
}

/// Serialized as a map of category to `0`/`1`, in category order.
impl Serialize for Classification<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (category, flag) in self.iter() {
            map.serialize_entry(category, &u8::from(flag))?;
        }
        map.end()
    }
}

/// Results of a batch: one row per input, one column per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    categories: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl ClassificationTable {
    /// # Panics
    ///
    /// Panics if a row's length differs from the number of categories.
    pub fn new(categories: Vec<String>, rows: Vec<Vec<bool>>) -> Self {
        assert!(
            rows.iter().all(|row| row.len() == categories.len()),
            "every row needs one flag per category"
        );
        Self { categories, rows }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.categories.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Result of the input at `index`.
    pub fn row(&self, index: usize) -> Option<Classification<'_>> {
        self.rows
            .get(index)
            .map(|flags| Classification::new(&self.categories, flags.clone()))
    }

    pub fn rows(&self) -> impl Iterator<Item = Classification<'_>> {
        self.rows
            .iter()
            .map(|flags| Classification::new(&self.categories, flags.clone()))
    }

    /// Flags of one category across all rows.
    pub fn column(&self, category: &str) -> Option<Vec<bool>> {
        let idx = self
            .categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(category))?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Flags of the column at `index`, top to bottom.
    pub(crate) fn column_at(&self, index: usize) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().map(move |row| row[index])
    }

    /// Number of flagged rows per category.
    pub fn column_sums(&self) -> Vec<usize> {
        (0..self.categories.len())
            .map(|idx| self.column_at(idx).filter(|f| *f).count())
            .collect()
    }

    /// Number of flags set in the whole table.
    pub fn total(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|f| **f).count())
            .sum()
    }
}

/// Serialized as `{ "categories": [...], "rows": [[0, 1, ...], ...] }`.
impl Serialize for ClassificationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<u8>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|f| u8::from(*f)).collect())
            .collect();
        let mut state = serializer.serialize_struct("ClassificationTable", 2)?;
        state.serialize_field("categories", &self.categories)?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}
