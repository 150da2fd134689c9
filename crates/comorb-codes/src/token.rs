//! Input normalization and code tokenization.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::rules::{CodingSystemRules, Tokenization};
use crate::system::CodingSystem;

/// A validated code in its native notation, decimal point retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CodeToken {
    code: String,
    system: CodingSystem,
}

impl CodeToken {
    pub(crate) fn new(code: String, system: CodingSystem) -> Self {
        Self { code, system }
    }

    /// The code as validated (`428.0`).
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// The coding system the code was validated against.
    pub fn system(&self) -> CodingSystem {
        self.system
    }

    /// Lookup key: the code with decimal points removed (`4280`).
    pub fn key(&self) -> String {
        self.code.replace('.', "")
    }
}

impl fmt::Display for CodeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// The validated codes extracted from one input string.
///
/// Restartable: iterate it as often as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<CodeToken>,
}

impl TokenSet {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeToken> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[CodeToken] {
        &self.tokens
    }

    /// Codes as strings, in extraction order.
    pub fn codes(&self) -> Vec<&str> {
        self.tokens.iter().map(CodeToken::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a CodeToken;
    type IntoIter = std::slice::Iter<'a, CodeToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenSet {
    type Item = CodeToken;
    type IntoIter = std::vec::IntoIter<CodeToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl FromIterator<CodeToken> for TokenSet {
    fn from_iter<I: IntoIterator<Item = CodeToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Uppercase, replace everything outside `[A-Z0-9.]` with a space, collapse
/// runs of spaces and trim.
///
/// ```
/// use comorb_codes::token::normalize;
///
/// assert_eq!(normalize(" 4280|4280,1611;\tv45.1 "), "4280 4280 1611 V45.1");
/// ```
pub fn normalize(input: &str) -> String {
    let mapped: String = input
        .chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' {
                c
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract every valid code of the given system from free text.
///
/// Candidates failing validation are dropped. Scan systems keep duplicate
/// codes; split systems keep only the first occurrence of each code.
pub fn tokenize<R: CodingSystemRules + ?Sized>(rules: &R, input: &str) -> TokenSet {
    extract(rules, rules.tokenization(), input)
}

/// Extract the codes compared against reference ranges.
///
/// ```
/// use comorb_codes::{Icd10Cm, tokenize, tokenize_for_ranges};
///
/// assert_eq!(tokenize_for_ranges(&Icd10Cm, "T51.0X1A").codes(), ["T51.0"]);
/// assert_eq!(tokenize(&Icd10Cm, "T51.0X1A").codes(), ["T51.0X1A"]);
/// ```
pub fn tokenize_for_ranges<R: CodingSystemRules + ?Sized>(rules: &R, input: &str) -> TokenSet {
    extract(rules, rules.range_tokenization(), input)
}

fn extract<R: CodingSystemRules + ?Sized>(
    rules: &R,
    tokenization: Tokenization,
    input: &str,
) -> TokenSet {
    let normalized = normalize(input);
    let system = rules.system();

    let tokens: TokenSet = match tokenization {
        Tokenization::Scan(pattern) => pattern
            .find_iter(&normalized)
            .filter_map(|candidate| validated(rules, candidate.as_str()))
            .collect(),
        Tokenization::Split => {
            let mut seen = HashSet::new();
            normalized
                .split(' ')
                .filter_map(|candidate| validated(rules, candidate))
                .filter(|token| seen.insert(token.code.clone()))
                .collect()
        }
    };

    tracing::trace!(%system, count = tokens.len(), "tokenized input");
    tokens
}

fn validated<R: CodingSystemRules + ?Sized>(rules: &R, candidate: &str) -> Option<CodeToken> {
    let token = rules.validate(candidate);
    if token.is_none() && !candidate.is_empty() {
        tracing::trace!(system = %rules.system(), candidate, "dropped invalid candidate");
    }
    token
}
