//! DataFrame export of batch results.

use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::result::ClassificationTable;

impl ClassificationTable {
    /// One `i32` column of `0`/`1` values per category, one row per input.
    ///
    /// # Errors
    ///
    /// Fails if two categories share a name.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .categories()
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let values: Vec<i32> = self.column_at(idx).map(i32::from).collect();
                Column::new(category.as_str().into(), values)
            })
            .collect();
        DataFrame::new(columns)
    }
}
