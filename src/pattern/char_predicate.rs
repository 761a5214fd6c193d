//! Single-character tests used by [`Pattern`](super::Pattern) leaves.

use std::fmt;
use std::ops::Not;

use itertools::Itertools;

/// A pure test over one character.
///
/// Predicates are plain values; cloning one is cheap apart from the
/// explicit-set and composite forms, which own their operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharPredicate {
    Always,
    Never,
    /// `0`..=`9`
    Digit,
    /// `0`..=`9`, `a`..=`f`, `A`..=`F`
    HexDigit,
    Uppercase,
    Lowercase,
    /// ASCII letters.
    Alpha,
    /// ASCII letters or `_`.
    AlphaUnderscore,
    /// ASCII letters or digits.
    AlphaNumeric,
    /// ASCII letters, digits or `_`.
    AlphaNumericUnderscore,
    Whitespace,
    /// Any Unicode alphabetic character.
    Letter,
    Is(char),
    IsNot(char),
    /// Inclusive range `[lo, hi]`.
    Range(char, char),
    NotRange(char, char),
    Among(Box<[char]>),
    NotAmong(Box<[char]>),
    Not(Box<CharPredicate>),
    All(Box<[CharPredicate]>),
    Any(Box<[CharPredicate]>),
    /// A caller-supplied test with a name for diagnostics.
    Custom(&'static str, fn(char) -> bool),
}

impl CharPredicate {
    /// Test whether `ch` satisfies this predicate.
    pub fn test(&self, ch: char) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Digit => ch.is_ascii_digit(),
            Self::HexDigit => ch.is_ascii_hexdigit(),
            Self::Uppercase => ch.is_uppercase(),
            Self::Lowercase => ch.is_lowercase(),
            Self::Alpha => ch.is_ascii_alphabetic(),
            Self::AlphaUnderscore => ch == '_' || ch.is_ascii_alphabetic(),
            Self::AlphaNumeric => ch.is_ascii_alphanumeric(),
            Self::AlphaNumericUnderscore => ch == '_' || ch.is_ascii_alphanumeric(),
            Self::Whitespace => ch.is_whitespace(),
            Self::Letter => ch.is_alphabetic(),
            Self::Is(c) => *c == ch,
            Self::IsNot(c) => *c != ch,
            Self::Range(lo, hi) => *lo <= ch && ch <= *hi,
            Self::NotRange(lo, hi) => !(*lo <= ch && ch <= *hi),
            Self::Among(set) => set.contains(&ch),
            Self::NotAmong(set) => !set.contains(&ch),
            Self::Not(p) => !p.test(ch),
            Self::All(ps) => ps.iter().all(|p| p.test(ch)),
            Self::Any(ps) => ps.iter().any(|p| p.test(ch)),
            Self::Custom(_, f) => f(ch),
        }
    }

    /// Characters in `chars`.
    pub fn among(chars: &str) -> Self {
        Self::Among(chars.chars().collect())
    }

    /// Characters not in `chars`.
    pub fn not_among(chars: &str) -> Self {
        Self::NotAmong(chars.chars().collect())
    }

    /// Both this and `other`.
    pub fn and(self, other: CharPredicate) -> Self {
        Self::all([self, other])
    }

    /// Either this or `other`.
    pub fn or(self, other: CharPredicate) -> Self {
        Self::any([self, other])
    }

    /// Conjunction of any number of predicates.
    ///
    /// No operands gives [`CharPredicate::Always`]; a single operand is
    /// returned as is.
    pub fn all(predicates: impl IntoIterator<Item = CharPredicate>) -> Self {
        let mut ps: Vec<_> = predicates.into_iter().collect();
        match ps.len() {
            0 => Self::Always,
            1 => ps.swap_remove(0),
            _ => Self::All(ps.into_boxed_slice()),
        }
    }

    /// Disjunction of any number of predicates.
    ///
    /// No operands gives [`CharPredicate::Never`]; a single operand is
    /// returned as is.
    pub fn any(predicates: impl IntoIterator<Item = CharPredicate>) -> Self {
        let mut ps: Vec<_> = predicates.into_iter().collect();
        match ps.len() {
            0 => Self::Never,
            1 => ps.swap_remove(0),
            _ => Self::Any(ps.into_boxed_slice()),
        }
    }
}

impl Not for CharPredicate {
    type Output = CharPredicate;

    fn not(self) -> CharPredicate {
        match self {
            Self::Always => Self::Never,
            Self::Never => Self::Always,
            Self::Is(c) => Self::IsNot(c),
            Self::IsNot(c) => Self::Is(c),
            Self::Range(lo, hi) => Self::NotRange(lo, hi),
            Self::NotRange(lo, hi) => Self::Range(lo, hi),
            Self::Among(set) => Self::NotAmong(set),
            Self::NotAmong(set) => Self::Among(set),
            Self::Not(p) => *p,
            other => Self::Not(Box::new(other)),
        }
    }
}

impl From<char> for CharPredicate {
    fn from(c: char) -> Self {
        Self::Is(c)
    }
}

impl fmt::Display for CharPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "any character"),
            Self::Never => write!(f, "none"),
            Self::Digit => write!(f, "[0-9]"),
            Self::HexDigit => write!(f, "[0-9a-fA-F]"),
            Self::Uppercase => write!(f, "uppercase"),
            Self::Lowercase => write!(f, "lowercase"),
            Self::Alpha => write!(f, "[a-zA-Z]"),
            Self::AlphaUnderscore => write!(f, "[a-zA-Z_]"),
            Self::AlphaNumeric => write!(f, "[0-9a-zA-Z]"),
            Self::AlphaNumericUnderscore => write!(f, "[0-9a-zA-Z_]"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Letter => write!(f, "letter"),
            Self::Is(c) => write!(f, "{c:?}"),
            Self::IsNot(c) => write!(f, "^{c:?}"),
            Self::Range(lo, hi) => write!(f, "[{}-{}]", lo.escape_debug(), hi.escape_debug()),
            Self::NotRange(lo, hi) => write!(f, "[^{}-{}]", lo.escape_debug(), hi.escape_debug()),
            Self::Among(set) => write!(f, "[{}]", set.iter().map(|c| c.escape_debug()).join("")),
            Self::NotAmong(set) => {
                write!(f, "[^{}]", set.iter().map(|c| c.escape_debug()).join(""))
            }
            Self::Not(p) => write!(f, "^{p}"),
            // Composites are bracketed so they nest unambiguously.
            Self::All(ps) => write!(f, "({})", ps.iter().join(" and ")),
            Self::Any(ps) => write!(f, "({})", ps.iter().join(" | ")),
            Self::Custom(name, _) => write!(f, "{name}"),
        }
    }
}
