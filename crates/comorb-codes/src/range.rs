//! Reference range expressions and the range comparator.
//!
//! A reference expression such as `"286.x, 287.1, 287.3-287.5"` is a comma
//! separated list of clauses. Each clause parses into one
//! [`RangeExpression`], and a code belongs to the expression when it matches
//! any clause.
//!
//! Range comparison splits the candidate and both endpoints into a category
//! prefix and a numeric remainder. The prefixes must be equal, then the
//! remainders are compared as decimal numbers:
//!
//! - an endpoint carrying an `X` wildcard widens the interval to
//!   `[min, max + width)`
//! - otherwise the interval is `[min, max]` or `[min, max)` depending on the
//!   coding system's [`UpperBound`]

use std::fmt;

use serde::Serialize;

use crate::error::{RangeError, Result};
use crate::grammar::clean;
use crate::rules::{CodingSystemRules, UpperBound};
use crate::token::CodeToken;

/// Wildcard marker inside reference codes (`428.X`).
pub const WILDCARD: char = 'X';

/// One clause of a reference expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeExpression {
    /// A single code, matched by equality.
    Exact { code: String },
    /// A code whose trailing digits are masked by `X`.
    WildcardPrefix { code: String },
    /// A two-endpoint interval; either endpoint may carry a wildcard.
    Range { min: String, max: String },
}

impl RangeExpression {
    /// Whether a validated token falls within this clause.
    pub fn matches<R: CodingSystemRules + ?Sized>(&self, rules: &R, token: &CodeToken) -> bool {
        self.matches_code(rules, token.as_str())
    }

    /// Whether a raw code string falls within this clause.
    pub fn matches_code<R: CodingSystemRules + ?Sized>(&self, rules: &R, code: &str) -> bool {
        match self {
            Self::Exact { code: reference } => exact_key(code) == exact_key(reference),
            Self::WildcardPrefix { code: reference } => {
                is_in_range(rules, code, reference, reference)
            }
            Self::Range { min, max } => is_in_range(rules, code, min, max),
        }
    }

    /// Endpoint codes of the clause.
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Self::Exact { code } | Self::WildcardPrefix { code } => (code, code),
            Self::Range { min, max } => (min, max),
        }
    }
}

impl fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact { code } | Self::WildcardPrefix { code } => f.write_str(code),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}

/// Parse one clause. A clause without any endpoint code yields `None`.
///
/// ```
/// use comorb_codes::range::{RangeExpression, parse_clause};
/// use comorb_codes::rules::Icd9Cm;
///
/// let clause = parse_clause(&Icd9Cm, "490.x-505.x").unwrap();
/// assert_eq!(
///     clause,
///     Some(RangeExpression::Range { min: "490.X".into(), max: "505.X".into() })
/// );
/// ```
pub fn parse_clause<R: CodingSystemRules + ?Sized>(
    rules: &R,
    clause: &str,
) -> Result<Option<RangeExpression>> {
    let clause = clause.to_ascii_uppercase();
    let endpoints: Vec<&str> = rules
        .reference_pattern()
        .find_iter(&clause)
        .map(|m| m.as_str())
        .collect();

    match endpoints.as_slice() {
        [] => Ok(None),
        [code] if code.contains(WILDCARD) => Ok(Some(RangeExpression::WildcardPrefix {
            code: (*code).to_string(),
        })),
        [code] => Ok(Some(RangeExpression::Exact {
            code: (*code).to_string(),
        })),
        [min, max] => Ok(Some(RangeExpression::Range {
            min: (*min).to_string(),
            max: (*max).to_string(),
        })),
        _ => Err(RangeError::TooManyEndpoints {
            system: rules.system(),
            clause: clause.trim().to_string(),
            count: endpoints.len(),
        }),
    }
}

/// Parse a full comma-separated reference expression.
///
/// Embedded newlines are removed first, so a range broken across lines
/// (`"344.0-\n344.6"`) stays one clause. Clauses in a single expression are
/// returned in source order.
pub fn parse_expression<R: CodingSystemRules + ?Sized>(
    rules: &R,
    expression: &str,
) -> Result<Vec<RangeExpression>> {
    let joined = expression.replace(['\n', '\r'], "");
    joined
        .split(',')
        .map(str::trim)
        .filter_map(|clause| parse_clause(rules, clause).transpose())
        .collect()
}

/// Whether `code` lies within the range given by `min` and `max`.
///
/// Pass the same code twice for a single wildcard reference. Codes failing
/// prefix agreement or numeric parsing never match.
///
/// ```
/// use comorb_codes::range::is_in_range;
/// use comorb_codes::rules::{Icd9Cm, Icd10Cm};
///
/// assert!(is_in_range(&Icd9Cm, "490.1", "490.x", "505.x"));
/// assert!(!is_in_range(&Icd9Cm, "506.0", "490.x", "505.x"));
/// assert!(is_in_range(&Icd10Cm, "Z72.1", "Z72.x", "Z72.x"));
/// ```
pub fn is_in_range<R: CodingSystemRules + ?Sized>(
    rules: &R,
    code: &str,
    min: &str,
    max: &str,
) -> bool {
    let (code, min, max) = (clean(code), clean(min), clean(max));

    let (
        Some((code_prefix, code_rest)),
        Some((min_prefix, min_rest)),
        Some((max_prefix, max_rest)),
    ) = (
        rules.split_prefix(&code),
        rules.split_prefix(&min),
        rules.split_prefix(&max),
    )
    else {
        return false;
    };
    if code_prefix != min_prefix || code_prefix != max_prefix {
        return false;
    }

    let Some(value) = parse_value(code_rest) else {
        tracing::trace!(system = %rules.system(), %code, "code is not numeric after its prefix");
        return false;
    };

    let masked = min_rest.contains(WILDCARD) || max_rest.contains(WILDCARD);
    let bounds = if masked {
        parse_value(&unmask(min_rest))
            .zip(parse_value(&unmask(max_rest)))
            .map(|(lo, hi)| (lo, hi + rules.wildcard_width(), UpperBound::Exclusive))
    } else {
        parse_value(min_rest)
            .zip(parse_value(max_rest))
            .map(|(lo, hi)| (lo, hi, rules.plain_upper_bound()))
    };
    let Some((lo, hi, upper)) = bounds else {
        return false;
    };

    value >= lo
        && match upper {
            UpperBound::Inclusive => value <= hi,
            UpperBound::Exclusive => value < hi,
        }
}

fn exact_key(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn unmask(code: &str) -> String {
    code.replace(WILDCARD, "")
}

/// Parse a decimal remainder such as `428.0`, `68.` or `175`.
///
/// Only ASCII digits and at most one decimal point are accepted, with at
/// least one digit.
fn parse_value(text: &str) -> Option<f64> {
    let mut points = 0;
    let mut digits = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }

    let trimmed = text.trim_end_matches('.');
    if trimmed.starts_with('.') {
        format!("0{trimmed}").parse().ok()
    } else {
        trimmed.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Icd9Cm, Icd10Cm};
    use crate::token::tokenize_for_ranges;

    #[test]
    fn parse_value_accepts_plain_decimals() {
        assert_eq!(parse_value("428.0"), Some(428.0));
        assert_eq!(parse_value("68."), Some(68.0));
        assert_eq!(parse_value(".5"), Some(0.5));
        assert_eq!(parse_value("175"), Some(175.0));
    }

    #[test]
    fn parse_value_rejects_other_text() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value("1.2.3"), None);
        assert_eq!(parse_value("4A"), None);
        assert_eq!(parse_value("-1"), None);
        assert_eq!(parse_value("1e3"), None);
    }

    #[test]
    fn icd9_wildcard_range() {
        assert!(is_in_range(&Icd9Cm, "490.1", "490.x", "505.x"));
        assert!(is_in_range(&Icd9Cm, "490.0", "490.x", "505.x"));
        assert!(is_in_range(&Icd9Cm, "505.9", "490.x", "505.x"));
        assert!(!is_in_range(&Icd9Cm, "506.0", "490.x", "505.x"));
        assert!(!is_in_range(&Icd9Cm, "489.9", "490.x", "505.x"));
    }

    #[test]
    fn icd9_plain_range_excludes_upper_endpoint() {
        assert!(is_in_range(&Icd9Cm, "344.0", "344.0", "344.6"));
        assert!(is_in_range(&Icd9Cm, "344.5", "344.0", "344.6"));
        assert!(!is_in_range(&Icd9Cm, "344.6", "344.0", "344.6"));
        assert!(!is_in_range(&Icd9Cm, "344.7", "344.0", "344.6"));
    }

    #[test]
    fn icd9_v_prefix_must_agree() {
        assert!(is_in_range(&Icd9Cm, "V56.0", "V56.x", "V56.x"));
        assert!(!is_in_range(&Icd9Cm, "56.0", "V56.x", "V56.x"));
        assert!(!is_in_range(&Icd9Cm, "V56.0", "56.x", "56.x"));
    }

    #[test]
    fn icd10_plain_range_includes_upper_endpoint() {
        assert!(is_in_range(&Icd10Cm, "D69.6", "D69.3", "D69.6"));
        assert!(is_in_range(&Icd10Cm, "D69.3", "D69.3", "D69.6"));
        assert!(!is_in_range(&Icd10Cm, "D69.7", "D69.3", "D69.6"));
    }

    #[test]
    fn icd10_single_code_ranges() {
        assert!(is_in_range(&Icd10Cm, "Z72.1", "Z72.1", "Z72.1"));
        assert!(!is_in_range(&Icd10Cm, "Z72.1", "Z72.2", "Z72.2"));
        assert!(is_in_range(&Icd10Cm, "Z72.1", "Z72.x", "Z72.x"));
        assert!(!is_in_range(&Icd10Cm, "Z72.1", "Z73.x", "Z73.x"));
        assert!(is_in_range(&Icd10Cm, "D51.2", "D51.x", "D53.x"));
    }

    #[test]
    fn icd10_one_masked_endpoint_widens_upper_bound() {
        assert!(is_in_range(&Icd10Cm, "D68.9", "D65", "D68.x"));
        assert!(!is_in_range(&Icd10Cm, "D69.0", "D65", "D68.x"));
    }

    #[test]
    fn icd10_category_letter_must_agree() {
        assert!(!is_in_range(&Icd10Cm, "E51.2", "D51.x", "D53.x"));
        assert!(!is_in_range(&Icd10Cm, "123", "D51.x", "D53.x"));
    }

    #[test]
    fn non_numeric_remainder_never_matches() {
        assert!(!is_in_range(&Icd10Cm, "C4A.0", "C40.x", "C49.x"));
        assert!(!is_in_range(&Icd10Cm, "M05.X1", "M05.x", "M05.x"));
    }

    #[test]
    fn letter_extensions_match_through_their_numeric_stem() {
        let clause = parse_clause(&Icd10Cm, "T51.x")
            .expect("parses")
            .expect("one clause");
        let tokens = tokenize_for_ranges(&Icd10Cm, "T51.0X1A");
        assert_eq!(tokens.codes(), ["T51.0"]);
        assert!(tokens.iter().any(|token| clause.matches(&Icd10Cm, token)));

        let clause = parse_clause(&Icd10Cm, "M05.x-M06.x")
            .expect("parses")
            .expect("one clause");
        let tokens = tokenize_for_ranges(&Icd10Cm, "M05.79A");
        assert!(tokens.iter().any(|token| clause.matches(&Icd10Cm, token)));
    }

    #[test]
    fn parse_expression_keeps_clause_order() {
        let clauses = parse_expression(&Icd9Cm, "286.x, 287.1, 287.3-287.5").expect("parses");
        assert_eq!(
            clauses,
            [
                RangeExpression::WildcardPrefix {
                    code: "286.X".into()
                },
                RangeExpression::Exact {
                    code: "287.1".into()
                },
                RangeExpression::Range {
                    min: "287.3".into(),
                    max: "287.5".into()
                },
            ]
        );
    }

    #[test]
    fn parse_expression_joins_lines() {
        let clauses =
            parse_expression(&Icd9Cm, "334.1, 342.x, 343.x, 344.0-\n344.6").expect("parses");
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[3].to_string(), "344.0-344.6");
    }

    #[test]
    fn parse_expression_skips_empty_clauses() {
        let clauses = parse_expression(&Icd10Cm, "F10, , E52,").expect("parses");
        assert_eq!(clauses.len(), 2);
        assert!(parse_expression(&Icd10Cm, "").expect("parses").is_empty());
    }

    #[test]
    fn three_endpoints_are_rejected() {
        let err = parse_expression(&Icd9Cm, "401.x, 402.1-402.5-402.9").unwrap_err();
        assert_eq!(
            err,
            RangeError::TooManyEndpoints {
                system: crate::CodingSystem::Icd9Cm,
                clause: "402.1-402.5-402.9".into(),
                count: 3,
            }
        );
    }

    #[test]
    fn exact_ignores_decimal_point_and_case() {
        let clause = RangeExpression::Exact {
            code: "Z72.1".into(),
        };
        assert!(clause.matches_code(&Icd10Cm, "Z72.1"));
        assert!(clause.matches_code(&Icd10Cm, "z721"));
        assert!(!clause.matches_code(&Icd10Cm, "Z72.10"));
    }

    #[test]
    fn clauses_serialize_with_kind_tag() {
        let clause = RangeExpression::Range {
            min: "490.X".into(),
            max: "505.X".into(),
        };
        let json = serde_json::to_value(&clause).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({"kind": "range", "min": "490.X", "max": "505.X"})
        );
    }
}
