//! Error types for reference expression parsing and pattern self-checks.
//!
//! Neither error is ever produced by classifying input text: invalid input
//! degrades to "no match". These errors describe broken reference data or a
//! broken build.

use thiserror::Error;

use crate::system::CodingSystem;

/// A reference range clause that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RangeError {
    /// A clause names three or more endpoint codes.
    #[error("{system} range clause '{clause}' has {count} endpoints, at most 2 are supported")]
    TooManyEndpoints {
        system: CodingSystem,
        clause: String,
        count: usize,
    },
}

/// A compiled pattern or grammar disagreed with its known fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A fixture that must be accepted was rejected.
    #[error("{check} rejected known-good fixture '{fixture}'")]
    RejectedGood {
        check: &'static str,
        fixture: &'static str,
    },

    /// A fixture that must be rejected was accepted.
    #[error("{check} accepted known-bad fixture '{fixture}'")]
    AcceptedBad {
        check: &'static str,
        fixture: &'static str,
    },
}

/// Result type for range expression parsing.
pub type Result<T> = std::result::Result<T, RangeError>;
