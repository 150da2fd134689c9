//! Code grammar validation.
//!
//! Validation is a pure function of the candidate string: a candidate either
//! yields its cleaned form or nothing. Invalid input never raises.
//!
//! ICD-10-CM validation walks an explicit state machine whose transitions are
//! driven by one character class per position, so each position's alphabet
//! can be reviewed on its own.

/// Minimum number of digits in an ICD-9-CM code (decimal point excluded).
pub const ICD9_MIN_DIGITS: usize = 2;

/// Maximum number of digits in an ICD-9-CM code (decimal point excluded).
pub const ICD9_MAX_DIGITS: usize = 8;

/// ICD-10-CM emergency-use codes accepted outside the general grammar.
pub const ICD10_EMERGENCY_CODES: [&str; 3] = ["U07", "U07.0", "U07.1"];

/// Uppercase a candidate and drop surrounding whitespace and embedded
/// tab/newline characters.
pub fn clean(candidate: &str) -> String {
    candidate
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate an ICD-9-CM candidate.
///
/// The grammar (`V?` followed by 2 to 8 digits) is checked on the form with
/// decimal points removed, but the decimal-bearing form is returned since that
/// is what takes part in range comparison.
///
/// ```
/// use comorb_codes::grammar::validate_icd9;
///
/// assert_eq!(validate_icd9("428.0").as_deref(), Some("428.0"));
/// assert_eq!(validate_icd9(" v45.1 ").as_deref(), Some("V45.1"));
/// assert_eq!(validate_icd9("1"), None);
/// ```
pub fn validate_icd9(candidate: &str) -> Option<String> {
    let cleaned = clean(candidate);
    let stripped: String = cleaned.chars().filter(|c| *c != '.').collect();
    let digits = stripped.strip_prefix('V').unwrap_or(&stripped);

    let valid = (ICD9_MIN_DIGITS..=ICD9_MAX_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit());
    valid.then_some(cleaned)
}

/// Validate an ICD-10-CM candidate.
///
/// ```
/// use comorb_codes::grammar::validate_icd10;
///
/// assert_eq!(validate_icd10("e11.9").as_deref(), Some("E11.9"));
/// assert_eq!(validate_icd10("U07.1").as_deref(), Some("U07.1"));
/// assert_eq!(validate_icd10("U07.2"), None);
/// assert_eq!(validate_icd10("E119"), None);
/// ```
pub fn validate_icd10(candidate: &str) -> Option<String> {
    let cleaned = clean(candidate);
    if ICD10_EMERGENCY_CODES.contains(&cleaned.as_str()) {
        return Some(cleaned);
    }

    let mut state = Icd10State::Start;
    for c in cleaned.chars() {
        state = state.step(c)?;
    }
    state.is_accepting().then_some(cleaned)
}

/// Character classes used by the ICD-10-CM grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// `[A-TV-Z]`: chapter letter, `U` is reserved.
    ChapterLetter,
    /// `[0-9]`
    Digit,
    /// `[0-9AB]`
    DigitOrAb,
    /// `[0-9A-KXZ]`: first character after the decimal point.
    FirstExtension,
    /// `[0-9A-EXYZ]`
    SecondExtension,
    /// `[0-9A-HX]`
    ThirdExtension,
    /// `[0-59A-HJKMNP-S]`: seventh character of the full code.
    FourthExtension,
}

impl CharClass {
    fn accepts(self, c: char) -> bool {
        match self {
            Self::ChapterLetter => c.is_ascii_uppercase() && c != 'U',
            Self::Digit => c.is_ascii_digit(),
            Self::DigitOrAb => c.is_ascii_digit() || matches!(c, 'A' | 'B'),
            Self::FirstExtension => c.is_ascii_digit() || matches!(c, 'A'..='K' | 'X' | 'Z'),
            Self::SecondExtension => c.is_ascii_digit() || matches!(c, 'A'..='E' | 'X'..='Z'),
            Self::ThirdExtension => c.is_ascii_digit() || matches!(c, 'A'..='H' | 'X'),
            Self::FourthExtension => matches!(
                c,
                '0'..='5' | '9' | 'A'..='H' | 'J' | 'K' | 'M' | 'N' | 'P'..='S'
            ),
        }
    }
}

/// Alphabets of the three category positions (`E11`).
const CATEGORY: [CharClass; 3] = [
    CharClass::ChapterLetter,
    CharClass::Digit,
    CharClass::DigitOrAb,
];

/// Alphabets of the optional positions after the decimal point, by depth.
const EXTENSION: [CharClass; 4] = [
    CharClass::FirstExtension,
    CharClass::SecondExtension,
    CharClass::ThirdExtension,
    CharClass::FourthExtension,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Icd10State {
    Start,
    /// Number of category characters consumed (1..=3).
    Category(usize),
    Point,
    /// Number of extension characters consumed (1..=4).
    Extension(usize),
}

impl Icd10State {
    fn step(self, c: char) -> Option<Self> {
        match self {
            Self::Start if CATEGORY[0].accepts(c) => Some(Self::Category(1)),
            Self::Category(n) if n < CATEGORY.len() && CATEGORY[n].accepts(c) => {
                Some(Self::Category(n + 1))
            }
            Self::Category(n) if n == CATEGORY.len() && c == '.' => Some(Self::Point),
            Self::Point if EXTENSION[0].accepts(c) => Some(Self::Extension(1)),
            Self::Extension(n) if n < EXTENSION.len() && EXTENSION[n].accepts(c) => {
                Some(Self::Extension(n + 1))
            }
            _ => None,
        }
    }

    fn is_accepting(self) -> bool {
        matches!(self, Self::Category(n) if n == CATEGORY.len())
            || matches!(self, Self::Extension(_))
    }
}
