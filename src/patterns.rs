//! Ready-made patterns and pattern constructors.
//!
//! The library patterns (`integer`, `word`, `hex_integer`, ...) are built
//! once on first use and shared; each call returns a cheap clone.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::pattern::ast::{Case, Node};
use crate::pattern::{CharPredicate, Pattern, parser};

pub use crate::pattern::{and, if_else, longest, not, or, peek, sequence, shortest};

// ─── Leaves ─────────────────────────────────────────────────────────────────

/// The pattern that never matches.
pub fn never() -> Pattern {
    Pattern::never()
}

/// The pattern that always matches zero characters.
pub fn always() -> Pattern {
    Pattern::always()
}

/// Any single character.
pub fn any_char() -> Pattern {
    has_at_least(1)
}

/// Matches zero characters, but only at the end of the window.
pub fn eof() -> Pattern {
    has_exact(0)
}

/// One character satisfying `predicate`.
pub fn is_char(predicate: CharPredicate) -> Pattern {
    match predicate {
        CharPredicate::Never => Pattern::never(),
        predicate => Pattern::new(Node::Char(predicate)),
    }
}

/// The single character `c`.
pub fn char_eq(c: char) -> Pattern {
    is_char(CharPredicate::Is(c))
}

/// One character in the inclusive range `[lo, hi]`.
pub fn range(lo: char, hi: char) -> Pattern {
    is_char(CharPredicate::Range(lo, hi))
}

/// One character from `chars`.
pub fn among(chars: &str) -> Pattern {
    is_char(CharPredicate::among(chars))
}

/// Consumes `n` characters if at least `n` remain.
pub fn has_at_least(n: usize) -> Pattern {
    if n == 0 {
        return Pattern::always();
    }
    Pattern::new(Node::HasAtLeast(n))
}

/// Consumes `n` characters if exactly `n` remain.
pub fn has_exact(n: usize) -> Pattern {
    Pattern::new(Node::HasExact(n))
}

/// The literal text `s`.
pub fn string(s: &str) -> Pattern {
    literal(s, Case::Sensitive)
}

/// The literal text `s`, ignoring case.
pub fn string_case_insensitive(s: &str) -> Pattern {
    literal(s, Case::Insensitive)
}

fn literal(s: &str, case: Case) -> Pattern {
    if s.is_empty() {
        return Pattern::always();
    }
    Pattern::new(Node::Literal {
        text: s.chars().collect(),
        case,
    })
}

/// One character, provided the input here does not start with `s`.
pub fn not_string(s: &str) -> Pattern {
    Pattern::new(Node::NotLiteral {
        text: s.chars().collect(),
        case: Case::Sensitive,
    })
}

/// One character, provided the input here does not start with `s` in any case.
pub fn not_string_case_insensitive(s: &str) -> Pattern {
    Pattern::new(Node::NotLiteral {
        text: s.chars().collect(),
        case: Case::Insensitive,
    })
}

/// Adapt the host regular-expression engine.
///
/// The match is anchored at `begin`. Every attempt copies the window into a
/// fresh string before handing it to the engine, so this is considerably
/// more expensive than the other leaves and best kept to short inputs.
pub fn regex(expr: &str) -> Result<Pattern, ConfigError> {
    let reject = |err: regex::Error| {
        debug!(expr, %err, "rejected host regex");
        ConfigError::HostRegex(err.to_string())
    };
    // Compiled on its own first, so `expr` cannot close the anchoring group.
    Regex::new(expr).map_err(reject)?;
    let regex = Regex::new(&format!("^(?:{expr})")).map_err(reject)?;
    Ok(Pattern::new(Node::Regex {
        source: expr.to_string(),
        regex,
    }))
}

/// Translate regular-expression syntax into a combinator tree.
///
/// See [`parser`] for the accepted syntax. Unlike [`regex`], the result
/// reads the input one character at a time and follows this crate's greedy,
/// non-backtracking semantics.
pub fn compile(expr: &str) -> Result<Pattern, ConfigError> {
    parser::parse(expr).inspect_err(|err| debug!(expr, %err, "rejected expression"))
}

// ─── Predicate shortcuts ────────────────────────────────────────────────────

/// Zero or more characters satisfying `predicate`.
pub fn many_chars(predicate: CharPredicate) -> Pattern {
    is_char(predicate).many()
}

/// One or more characters satisfying `predicate`.
pub fn many1_chars(predicate: CharPredicate) -> Pattern {
    is_char(predicate).many1()
}

/// At least `min` characters satisfying `predicate`.
pub fn at_least_chars(min: usize, predicate: CharPredicate) -> Pattern {
    is_char(predicate).at_least(min)
}

/// Between `min` and `max` characters satisfying `predicate`.
pub fn times_chars(
    min: usize,
    max: usize,
    predicate: CharPredicate,
) -> Result<Pattern, ConfigError> {
    is_char(predicate).times(min, max)
}

/// Exactly `n` characters satisfying `predicate`.
pub fn repeat_chars(n: usize, predicate: CharPredicate) -> Pattern {
    is_char(predicate).repeat(n)
}

// ─── Algebraic helpers ──────────────────────────────────────────────────────

/// `p1.or(p2)`, without building an alternation around `never`.
pub fn or_without_empty(p1: Pattern, p2: Pattern) -> Pattern {
    if p1.is_never() {
        p2
    } else if p2.is_never() {
        p1
    } else {
        p1.or(p2)
    }
}

/// `p1.next(p2)`, short-circuiting to `never` when either side is `never`.
pub fn next_with_empty(p1: Pattern, p2: Pattern) -> Pattern {
    if p1.is_never() || p2.is_never() {
        Pattern::never()
    } else {
        p1.next(p2)
    }
}

// ─── Library ────────────────────────────────────────────────────────────────

static INTEGER: LazyLock<Pattern> = LazyLock::new(|| many1_chars(CharPredicate::Digit));

static FRACTION: LazyLock<Pattern> = LazyLock::new(|| char_eq('.').next(integer()));

static STRICT_DECIMAL: LazyLock<Pattern> = LazyLock::new(|| {
    integer().next(char_eq('.').next(many_chars(CharPredicate::Digit)).optional())
});

static DECIMAL: LazyLock<Pattern> = LazyLock::new(|| strict_decimal().or(fraction()));

static WORD: LazyLock<Pattern> = LazyLock::new(|| {
    is_char(CharPredicate::AlphaUnderscore).next(many_chars(CharPredicate::AlphaNumericUnderscore))
});

static OCT_INTEGER: LazyLock<Pattern> =
    LazyLock::new(|| char_eq('0').next(many_chars(CharPredicate::Range('0', '7'))));

static DEC_INTEGER: LazyLock<Pattern> =
    LazyLock::new(|| range('1', '9').next(many_chars(CharPredicate::Digit)));

static HEX_INTEGER: LazyLock<Pattern> = LazyLock::new(|| {
    string("0x")
        .or(string("0X"))
        .next(many1_chars(CharPredicate::HexDigit))
});

static SCIENTIFIC_NOTATION: LazyLock<Pattern> = LazyLock::new(|| {
    sequence([decimal(), among("eE"), among("+-").optional(), integer()])
});

static ESCAPED_CHAR: LazyLock<Pattern> = LazyLock::new(|| char_eq('\\').next(any_char()));

static DOUBLE_QUOTED_STRING: LazyLock<Pattern> = LazyLock::new(|| {
    let body = escaped_char().or(is_char(CharPredicate::not_among("\"\\")));
    sequence([char_eq('"'), body.many(), char_eq('"')])
});

static SINGLE_QUOTED_STRING: LazyLock<Pattern> = LazyLock::new(|| {
    let body = string("''").or(is_char(CharPredicate::IsNot('\'')));
    sequence([char_eq('\''), body.many(), char_eq('\'')])
});

static REGEXP_LITERAL: LazyLock<Pattern> = LazyLock::new(|| {
    let body = escaped_char().or(is_char(CharPredicate::not_among("/\r\n\\")));
    sequence([char_eq('/'), body.many(), char_eq('/')])
});

static REGEXP_MODIFIERS: LazyLock<Pattern> = LazyLock::new(|| many_chars(CharPredicate::Alpha));

/// One or more decimal digits.
pub fn integer() -> Pattern {
    INTEGER.clone()
}

/// `.` followed by one or more digits, as in `.5`.
pub fn fraction() -> Pattern {
    FRACTION.clone()
}

/// Digits, optionally followed by `.` and more digits: `1`, `1.`, `1.5`.
pub fn strict_decimal() -> Pattern {
    STRICT_DECIMAL.clone()
}

/// A [`strict_decimal`] or a [`fraction`].
pub fn decimal() -> Pattern {
    DECIMAL.clone()
}

/// An identifier: a letter or `_`, then letters, digits or `_`.
pub fn word() -> Pattern {
    WORD.clone()
}

/// `0` followed by octal digits. A lone `0` is an octal integer.
pub fn oct_integer() -> Pattern {
    OCT_INTEGER.clone()
}

/// A decimal integer without a leading zero.
pub fn dec_integer() -> Pattern {
    DEC_INTEGER.clone()
}

/// `0x` or `0X` followed by hex digits.
pub fn hex_integer() -> Pattern {
    HEX_INTEGER.clone()
}

/// A decimal, `e` or `E`, an optional sign and an integer exponent.
pub fn scientific_notation() -> Pattern {
    SCIENTIFIC_NOTATION.clone()
}

/// A backslash and the character it escapes.
pub fn escaped_char() -> Pattern {
    ESCAPED_CHAR.clone()
}

/// `"..."` with backslash escapes.
pub fn double_quoted_string() -> Pattern {
    DOUBLE_QUOTED_STRING.clone()
}

/// `'...'` where `''` stands for one quote.
pub fn single_quoted_string() -> Pattern {
    SINGLE_QUOTED_STRING.clone()
}

/// `/.../` with backslash escapes; the body may not span lines.
pub fn regexp_literal() -> Pattern {
    REGEXP_LITERAL.clone()
}

/// The flag letters after a regexp literal, possibly none.
pub fn regexp_modifiers() -> Pattern {
    REGEXP_MODIFIERS.clone()
}

/// `prefix` followed by the rest of the line, not including the line break.
pub fn line_comment(prefix: &str) -> Pattern {
    string(prefix).next(many_chars(CharPredicate::not_among("\r\n")))
}

/// `open`, anything not starting `close`, then `close`.
pub fn block_comment(open: &str, close: &str) -> Pattern {
    sequence([string(open), not_string(close).many(), string(close)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(p: &Pattern, text: &str) -> Option<usize> {
        let chars: Vec<char> = text.chars().collect();
        p.match_all(&chars)
    }

    // --- Leaves ---

    #[test]
    fn is_char_consumes_one() {
        let digit = is_char(CharPredicate::Digit);
        assert_eq!(len(&digit, "7a"), Some(1));
        assert_eq!(len(&digit, "a7"), None);
        assert_eq!(len(&digit, ""), None);
    }

    #[test]
    fn has_at_least_ignores_content() {
        assert_eq!(len(&has_at_least(3), "abcd"), Some(3));
        assert_eq!(len(&has_at_least(3), "ab"), None);
        assert_eq!(len(&any_char(), "\n"), Some(1));
    }

    #[test]
    fn has_exact_needs_exact_remainder() {
        assert_eq!(len(&has_exact(2), "ab"), Some(2));
        assert_eq!(len(&has_exact(2), "abc"), None);
        assert_eq!(len(&eof(), ""), Some(0));
        assert_eq!(len(&eof(), "x"), None);
    }

    #[test]
    fn string_literals() {
        assert_eq!(len(&string("let"), "let x"), Some(3));
        assert_eq!(len(&string("let"), "LET x"), None);
        assert_eq!(len(&string_case_insensitive("let"), "LeT x"), Some(3));
        assert_eq!(len(&string("let"), "le"), None);
    }

    #[test]
    fn string_respects_window_end() {
        let chars: Vec<char> = "letter".chars().collect();
        assert_eq!(string("let").match_at(&chars, 0, 2), None);
        assert_eq!(string("let").match_at(&chars, 0, 3), Some(3));
    }

    #[test]
    fn not_string_consumes_one_char() {
        assert_eq!(len(&not_string("*/"), "a*/"), Some(1));
        assert_eq!(len(&not_string("*/"), "*a"), Some(1));
        assert_eq!(len(&not_string("*/"), "*/"), None);
        assert_eq!(len(&not_string("*/"), ""), None);
        assert_eq!(len(&not_string_case_insensitive("END"), "end"), None);
        assert_eq!(len(&not_string_case_insensitive("END"), "enx"), Some(1));
    }

    #[test]
    fn host_regex_is_anchored() {
        let p = regex("[a-z]+").unwrap();
        assert_eq!(len(&p, "abc123"), Some(3));
        assert_eq!(len(&p, "1abc"), None);
    }

    #[test]
    fn host_regex_counts_chars_not_bytes() {
        let p = regex("é+").unwrap();
        assert_eq!(len(&p, "ééx"), Some(2));
    }

    #[test]
    fn host_regex_sees_only_the_window() {
        let chars: Vec<char> = "xabcdef".chars().collect();
        let p = regex("[a-z]+").unwrap();
        assert_eq!(p.match_at(&chars, 1, 4), Some(3));
        let p = regex("abc$").unwrap();
        assert_eq!(p.match_at(&chars, 1, 4), Some(3));
    }

    #[test]
    fn host_regex_cannot_escape_the_anchor() {
        assert!(matches!(regex("a)|(b"), Err(ConfigError::HostRegex(_))));
        assert!(matches!(regex(")(b"), Err(ConfigError::HostRegex(_))));
        let p = regex("a|b").unwrap();
        assert_eq!(len(&p, "xb"), None);
        assert_eq!(len(&p, "b"), Some(1));
    }

    #[test]
    fn host_regex_rejects_bad_syntax() {
        assert!(matches!(regex("(unclosed"), Err(ConfigError::HostRegex(_))));
    }

    #[test]
    fn compile_builds_combinators() {
        let p = compile("0[xX][0-9a-f]+").unwrap();
        assert_eq!(len(&p, "0x1f!"), Some(4));
        assert!(compile("(").is_err());
    }

    // --- Algebraic helpers ---

    #[test]
    fn or_without_empty_drops_never() {
        let a = string("a");
        assert!(or_without_empty(never(), never()).is_never());
        assert_eq!(or_without_empty(never(), a.clone()).to_string(), "\"a\"");
        assert_eq!(or_without_empty(a.clone(), never()).to_string(), "\"a\"");
        assert_eq!(len(&or_without_empty(a, string("b")), "b"), Some(1));
    }

    #[test]
    fn next_with_empty_propagates_never() {
        assert!(next_with_empty(never(), string("a")).is_never());
        assert!(next_with_empty(string("a"), never()).is_never());
        assert_eq!(len(&next_with_empty(string("a"), string("b")), "ab"), Some(2));
    }

    // --- Library ---

    #[test]
    fn integer_needs_a_digit() {
        assert_eq!(len(&integer(), "123abc"), Some(3));
        assert_eq!(len(&integer(), "abc"), None);
    }

    #[test]
    fn decimals() {
        assert_eq!(len(&strict_decimal(), "12.50x"), Some(5));
        assert_eq!(len(&strict_decimal(), "12."), Some(3));
        assert_eq!(len(&strict_decimal(), ".5"), None);
        assert_eq!(len(&fraction(), ".5"), Some(2));
        assert_eq!(len(&fraction(), "."), None);
        assert_eq!(len(&decimal(), ".25"), Some(3));
        assert_eq!(len(&decimal(), "7"), Some(1));
    }

    #[test]
    fn word_allows_underscore_and_trailing_digits() {
        assert_eq!(len(&word(), "_foo9 bar"), Some(5));
        assert_eq!(len(&word(), "9foo"), None);
    }

    #[test]
    fn integer_radices() {
        assert_eq!(len(&oct_integer(), "017x"), Some(3));
        assert_eq!(len(&oct_integer(), "0"), Some(1));
        assert_eq!(len(&oct_integer(), "089"), Some(1));
        assert_eq!(len(&dec_integer(), "120"), Some(3));
        assert_eq!(len(&dec_integer(), "012"), None);
        assert_eq!(len(&hex_integer(), "0xFFz"), Some(4));
        assert_eq!(len(&hex_integer(), "0X1"), Some(3));
        assert_eq!(len(&hex_integer(), "0x"), None);
    }

    #[test]
    fn scientific() {
        assert_eq!(len(&scientific_notation(), "1.5e10"), Some(6));
        assert_eq!(len(&scientific_notation(), "2E-3;"), Some(4));
        assert_eq!(len(&scientific_notation(), ".5e+1"), Some(5));
        assert_eq!(len(&scientific_notation(), "1.5"), None);
        assert_eq!(len(&scientific_notation(), "1e"), None);
    }

    #[test]
    fn line_comment_stops_before_line_break() {
        let p = line_comment("//");
        assert_eq!(len(&p, "// hi\nnext"), Some(5));
        assert_eq!(len(&p, "// hi\r\nnext"), Some(5));
        assert_eq!(len(&p, "//"), Some(2));
        assert_eq!(len(&p, "/ no"), None);
    }

    #[test]
    fn block_comment_stops_at_first_close() {
        let p = block_comment("/*", "*/");
        assert_eq!(len(&p, "/* a * b */ c */"), Some(11));
        assert_eq!(len(&p, "/**/"), Some(4));
        assert_eq!(len(&p, "/* open"), None);
    }

    #[test]
    fn quoted_strings() {
        assert_eq!(len(&double_quoted_string(), r#""a\"b" tail"#), Some(6));
        assert_eq!(len(&double_quoted_string(), r#""open"#), None);
        assert_eq!(len(&single_quoted_string(), "'it''s' x"), Some(7));
        assert_eq!(len(&single_quoted_string(), "''"), Some(2));
    }

    #[test]
    fn regexp_literal_with_escapes() {
        assert_eq!(len(&regexp_literal(), r"/a\/b/gi"), Some(6));
        assert_eq!(len(&regexp_literal(), "/a\nb/"), None);
        let with_flags = regexp_literal().next(regexp_modifiers());
        assert_eq!(len(&with_flags, r"/a\/b/gi;"), Some(8));
        assert_eq!(len(&regexp_modifiers(), "1"), Some(0));
    }

    #[test]
    fn library_patterns_are_shared() {
        let a = integer();
        let b = integer();
        assert!(std::ptr::eq(a.node(), b.node()));
    }
}
