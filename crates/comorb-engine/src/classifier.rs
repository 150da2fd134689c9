//! The classifier seam shared by every lookup mode.

use comorb_codes::CodingSystem;

use crate::batch;
use crate::result::{Classification, ClassificationTable};

/// Maps free text to a fixed-length, fixed-order vector of category flags.
///
/// Implementations are immutable after construction and safe to share
/// across threads.
pub trait Classifier: Send + Sync {
    /// Coding system whose codes are extracted from input text.
    fn system(&self) -> CodingSystem;

    /// Category labels in output column order.
    fn categories(&self) -> &[String];

    /// Flags for every category. Empty or code-free input yields all zeros.
    fn classify(&self, input: &str) -> Classification<'_>;

    /// The flagged category labels joined with `" | "`, or `None`.
    fn label(&self, input: &str) -> Option<String> {
        self.classify(input).label()
    }

    /// Classify many inputs. Row `i` is `classify(inputs[i])`.
    fn classify_all<S>(&self, inputs: &[S]) -> ClassificationTable
    where
        Self: Sized,
        S: AsRef<str> + Sync,
    {
        batch::classify_all(self, inputs)
    }
}
