//! ICD-9-CM and ICD-10-CM code grammars, tokenization and range comparison.
//!
//! This crate provides:
//!
//! - **Grammar validation** for ICD-9-CM and ICD-10-CM codes
//! - **Tokenization** of free text into validated [`CodeToken`]s
//! - **Reference range expressions** (exact, wildcard, two-endpoint) and
//!   the comparator deciding containment
//! - **[`CodingSystemRules`]**, the per-system capability set shared by all of
//!   the above
//!
//! # Example
//!
//! ```
//! use comorb_codes::{Icd9Cm, parse_expression, tokenize};
//!
//! let clauses = parse_expression(&Icd9Cm, "286.x, 287.1, 287.3-287.5").unwrap();
//! let tokens = tokenize(&Icd9Cm, "dx 287.3 | 401.1");
//!
//! let matched = tokens
//!     .iter()
//!     .any(|token| clauses.iter().any(|clause| clause.matches(&Icd9Cm, token)));
//! assert!(matched);
//! ```

pub mod error;
pub mod grammar;
pub mod patterns;
pub mod range;
pub mod rules;
pub mod system;
pub mod token;

pub use error::{PatternError, RangeError, Result};
pub use patterns::{ensure_verified, verify_patterns};
pub use range::{RangeExpression, is_in_range, parse_clause, parse_expression};
pub use rules::{CodingSystemRules, Icd9Cm, Icd10Cm, Tokenization, UpperBound, rules_for};
pub use system::CodingSystem;
pub use token::{CodeToken, TokenSet, normalize, tokenize, tokenize_for_ranges};
