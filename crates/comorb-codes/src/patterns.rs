//! Compiled code patterns and their startup self-check.
//!
//! Patterns are compiled once on first use. [`ensure_verified`] runs the
//! fixture check at most once per process and caches the outcome.

use std::sync::{LazyLock, OnceLock};

use regex::Regex;

use crate::error::PatternError;
use crate::grammar::{validate_icd9, validate_icd10};

/// Scan pattern for ICD-9-CM candidates in normalized text.
pub static ICD9_SCAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"V?[0-9]+(?:\.[0-9]+)?").expect("Invalid ICD-9 scan regex"));

/// Endpoint codes inside an ICD-9-CM reference clause (`490.X`, `V45.1`).
pub static ICD9_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"V?[0-9]+\.?X?[0-9]*").expect("Invalid ICD-9 reference regex"));

/// Scan pattern for ICD-10-CM candidates matched against reference ranges.
///
/// Stops before letter extensions, so `T51.0X1A` yields `T51.0`.
pub static ICD10_SCAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][0-9]+\.?X?[0-9]*").expect("Invalid ICD-10 scan regex"));

/// Endpoint codes inside an ICD-10 reference clause (`D68.X`, `Z72.1`).
pub static ICD10_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][0-9]+\.?X?[0-9]*").expect("Invalid ICD-10 reference regex")
});

type Fixtures = (&'static str, &'static [&'static str], &'static [&'static str]);

const ICD9_SCAN_FIXTURES: Fixtures = (
    "ICD-9 scan pattern",
    &["428.0", "4280", "V45.1", "42"],
    &["ABC", "."],
);

const ICD9_REFERENCE_FIXTURES: Fixtures = (
    "ICD-9 reference pattern",
    &["490.X", "V56.X", "344.0", "175"],
    &["X", "-"],
);

const ICD10_SCAN_FIXTURES: Fixtures = (
    "ICD-10 scan pattern",
    &["T51.0", "E11.9", "Z23", "M05.79"],
    &["123", "E", "T51.0X1A"],
);

const ICD10_REFERENCE_FIXTURES: Fixtures = (
    "ICD-10 reference pattern",
    &["D68.X", "Z72.1", "F10"],
    &["123", "Z."],
);

const ICD9_GRAMMAR: Fixtures = (
    "ICD-9 grammar",
    &["428.0", "4280", "V45.1", "12345678"],
    &["1", "123456789", "E849", "V"],
);

const ICD10_GRAMMAR: Fixtures = (
    "ICD-10 grammar",
    &["E11.9", "Z20.828", "T36.0X1A", "C4A", "U07", "U07.1"],
    &["U07.2", "E11.", "E119", "123", "S72.001A1"],
);

/// Check every compiled pattern and both grammars against known fixtures.
///
/// A pattern must match each good fixture in full and must not match any
/// bad fixture in full.
pub fn verify_patterns() -> Result<(), PatternError> {
    let patterns: [(&Regex, Fixtures); 4] = [
        (&ICD9_SCAN, ICD9_SCAN_FIXTURES),
        (&ICD9_REFERENCE, ICD9_REFERENCE_FIXTURES),
        (&ICD10_SCAN, ICD10_SCAN_FIXTURES),
        (&ICD10_REFERENCE, ICD10_REFERENCE_FIXTURES),
    ];
    for (pattern, (check, good, bad)) in patterns {
        verify_fixtures(check, good, bad, |fixture| full_match(pattern, fixture))?;
    }

    let (check, good, bad) = ICD9_GRAMMAR;
    verify_fixtures(check, good, bad, |fixture| validate_icd9(fixture).is_some())?;

    let (check, good, bad) = ICD10_GRAMMAR;
    verify_fixtures(check, good, bad, |fixture| validate_icd10(fixture).is_some())?;

    tracing::debug!("code patterns verified against fixtures");
    Ok(())
}

/// Run [`verify_patterns`] once per process and return the cached outcome.
pub fn ensure_verified() -> Result<(), PatternError> {
    static VERIFIED: OnceLock<Result<(), PatternError>> = OnceLock::new();
    VERIFIED.get_or_init(verify_patterns).clone()
}

fn full_match(pattern: &Regex, text: &str) -> bool {
    pattern
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

fn verify_fixtures(
    check: &'static str,
    good: &[&'static str],
    bad: &[&'static str],
    accepts: impl Fn(&str) -> bool,
) -> Result<(), PatternError> {
    if let Some(fixture) = good.iter().copied().find(|fixture| !accepts(fixture)) {
        return Err(PatternError::RejectedGood { check, fixture });
    }
    if let Some(fixture) = bad.iter().copied().find(|fixture| accepts(fixture)) {
        return Err(PatternError::AcceptedBad { check, fixture });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_patterns_pass_self_check() {
        assert_eq!(verify_patterns(), Ok(()));
        assert_eq!(ensure_verified(), Ok(()));
    }

    #[test]
    fn reference_patterns_split_range_endpoints() {
        let endpoints: Vec<_> = ICD9_REFERENCE
            .find_iter("490.X-505.X")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(endpoints, ["490.X", "505.X"]);

        let endpoints: Vec<_> = ICD10_REFERENCE
            .find_iter("D51.1-D51.2")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(endpoints, ["D51.1", "D51.2"]);
    }

    #[test]
    fn icd10_scan_stops_before_letter_extensions() {
        let codes: Vec<_> = ICD10_SCAN
            .find_iter("T51.0X1A M05.79A E11.9")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(codes, ["T51.0", "X1", "M05.79", "E11.9"]);
    }

    #[test]
    fn fixture_failures_name_the_check() {
        let err = verify_fixtures("digits", &["12", "ab"], &[], |s| {
            s.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap_err();
        assert_eq!(
            err,
            PatternError::RejectedGood {
                check: "digits",
                fixture: "ab"
            }
        );
        assert_eq!(err.to_string(), "digits rejected known-good fixture 'ab'");
    }
}
