//! Per-coding-system rule sets.
//!
//! One tokenizer and one range comparator serve every coding system. What
//! differs between systems is captured by [`CodingSystemRules`] and
//! implemented by the unit structs [`Icd9Cm`] and [`Icd10Cm`].

use regex::Regex;

use crate::grammar::{validate_icd9, validate_icd10};
use crate::patterns::{ICD9_REFERENCE, ICD9_SCAN, ICD10_REFERENCE, ICD10_SCAN};
use crate::system::CodingSystem;
use crate::token::CodeToken;

/// How candidate codes are pulled out of normalized input text.
#[derive(Debug, Clone, Copy)]
pub enum Tokenization {
    /// Every match of the pattern is a candidate. Duplicates are kept.
    Scan(&'static Regex),
    /// Every whitespace-separated word is a candidate. Duplicates are dropped.
    Split,
}

/// Whether the upper endpoint of a range without wildcards is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpperBound {
    Inclusive,
    Exclusive,
}

/// The capability set that distinguishes one coding system from another.
pub trait CodingSystemRules: Send + Sync {
    /// The coding system these rules implement.
    fn system(&self) -> CodingSystem;

    /// Validate a single candidate against the system grammar.
    fn validate(&self, candidate: &str) -> Option<CodeToken>;

    /// How candidates are extracted from input text.
    fn tokenization(&self) -> Tokenization;

    /// How candidates are extracted when they are compared against
    /// reference ranges rather than looked up by key.
    fn range_tokenization(&self) -> Tokenization {
        self.tokenization()
    }

    /// Pattern extracting endpoint codes from one reference clause.
    fn reference_pattern(&self) -> &'static Regex;

    /// Split an uppercase code into its category prefix and numeric remainder.
    ///
    /// Returns `None` when the code cannot carry a prefix of this system at
    /// all. Codes are only ever compared when their prefixes are equal.
    fn split_prefix<'a>(&self, code: &'a str) -> Option<(Option<char>, &'a str)>;

    /// Upper-bound rule for ranges whose endpoints carry no wildcard.
    fn plain_upper_bound(&self) -> UpperBound;

    /// Numeric width covered by a wildcard position.
    fn wildcard_width(&self) -> f64 {
        1.0
    }
}

/// ICD-9-CM: scanned tokens, optional `V` prefix, half-open plain ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Icd9Cm;

impl CodingSystemRules for Icd9Cm {
    fn system(&self) -> CodingSystem {
        CodingSystem::Icd9Cm
    }

    fn validate(&self, candidate: &str) -> Option<CodeToken> {
        validate_icd9(candidate).map(|code| CodeToken::new(code, CodingSystem::Icd9Cm))
    }

    fn tokenization(&self) -> Tokenization {
        Tokenization::Scan(&ICD9_SCAN)
    }

    fn reference_pattern(&self) -> &'static Regex {
        &ICD9_REFERENCE
    }

    fn split_prefix<'a>(&self, code: &'a str) -> Option<(Option<char>, &'a str)> {
        // With the shared `V` stripped, `V` codes compare numerically against
        // `V` wildcards and ranges (`V56.47` falls in `V56.x`). Pending
        // clinical-coding review.
        Some(match code.strip_prefix('V') {
            Some(rest) => (Some('V'), rest),
            None => (None, code),
        })
    }

    fn plain_upper_bound(&self) -> UpperBound {
        UpperBound::Exclusive
    }
}

/// ICD-10-CM: whitespace-split tokens, mandatory chapter letter, closed ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Icd10Cm;

impl CodingSystemRules for Icd10Cm {
    fn system(&self) -> CodingSystem {
        CodingSystem::Icd10Cm
    }

    fn validate(&self, candidate: &str) -> Option<CodeToken> {
        validate_icd10(candidate).map(|code| CodeToken::new(code, CodingSystem::Icd10Cm))
    }

    fn tokenization(&self) -> Tokenization {
        Tokenization::Split
    }

    fn range_tokenization(&self) -> Tokenization {
        Tokenization::Scan(&ICD10_SCAN)
    }

    fn reference_pattern(&self) -> &'static Regex {
        &ICD10_REFERENCE
    }

    fn split_prefix<'a>(&self, code: &'a str) -> Option<(Option<char>, &'a str)> {
        let letter = code.chars().next().filter(char::is_ascii_alphabetic)?;
        Some((Some(letter), &code[letter.len_utf8()..]))
    }

    fn plain_upper_bound(&self) -> UpperBound {
        UpperBound::Inclusive
    }
}

/// Rules for a coding system, as a trait object.
pub fn rules_for(system: CodingSystem) -> &'static dyn CodingSystemRules {
    match system {
        CodingSystem::Icd9Cm => &Icd9Cm,
        CodingSystem::Icd10Cm => &Icd10Cm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icd9_prefix_is_optional() {
        assert_eq!(Icd9Cm.split_prefix("V45.1"), Some((Some('V'), "45.1")));
        assert_eq!(Icd9Cm.split_prefix("428.0"), Some((None, "428.0")));
    }

    #[test]
    fn icd10_prefix_is_mandatory() {
        assert_eq!(Icd10Cm.split_prefix("D68.X"), Some((Some('D'), "68.X")));
        assert_eq!(Icd10Cm.split_prefix("123"), None);
        assert_eq!(Icd10Cm.split_prefix(""), None);
    }

    #[test]
    fn upper_bounds_differ_per_system() {
        assert_eq!(Icd9Cm.plain_upper_bound(), UpperBound::Exclusive);
        assert_eq!(Icd10Cm.plain_upper_bound(), UpperBound::Inclusive);
    }

    #[test]
    fn icd10_ranges_scan_while_lookups_split() {
        assert!(matches!(Icd10Cm.tokenization(), Tokenization::Split));
        assert!(matches!(Icd10Cm.range_tokenization(), Tokenization::Scan(_)));
        assert!(matches!(Icd9Cm.range_tokenization(), Tokenization::Scan(_)));
    }

    #[test]
    fn rules_for_dispatches_by_system() {
        for system in CodingSystem::all() {
            assert_eq!(rules_for(*system).system(), *system);
        }
    }
}
