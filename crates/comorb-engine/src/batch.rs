//! Batch classification.
//!
//! Rows are independent, so with the `parallel` feature the batch is split
//! across the rayon thread pool. Row order always follows input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::result::ClassificationTable;

/// Classify every input against one classifier.
pub fn classify_all<C, S>(classifier: &C, inputs: &[S]) -> ClassificationTable
where
    C: Classifier + ?Sized,
    S: AsRef<str> + Sync,
{
    let span = tracing::debug_span!(
        "classify_all",
        system = %classifier.system(),
        rows = inputs.len()
    );
    let _guard = span.enter();

    let rows = classify_rows(classifier, inputs);
    let table = ClassificationTable::new(classifier.categories().to_vec(), rows);

    tracing::debug!(flags = table.total(), "batch classified");
    table
}

#[cfg(feature = "parallel")]
fn classify_rows<C, S>(classifier: &C, inputs: &[S]) -> Vec<Vec<bool>>
where
    C: Classifier + ?Sized,
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| classifier.classify(input.as_ref()).into_flags())
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn classify_rows<C, S>(classifier: &C, inputs: &[S]) -> Vec<Vec<bool>>
where
    C: Classifier + ?Sized,
    S: AsRef<str> + Sync,
{
    inputs
        .iter()
        .map(|input| classifier.classify(input.as_ref()).into_flags())
        .collect()
}
