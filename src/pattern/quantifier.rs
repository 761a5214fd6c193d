//! Repetition loops shared by the quantifier nodes.
//!
//! `acc` is the length already consumed by the caller; every function
//! returns `acc` plus whatever it consumes from `from`.

use crate::source::CharSource;

use super::Pattern;

/// Match `pattern` exactly `n` times in a row.
///
/// A zero-length match ends the loop early: matching is pure, so every
/// remaining attempt would match nothing at the same position.
pub(crate) fn match_repeat<S: CharSource + ?Sized>(
    n: usize,
    pattern: &Pattern,
    src: &S,
    from: usize,
    end: usize,
    acc: usize,
) -> Option<usize> {
    let mut cur = from;
    for _ in 0..n {
        match pattern.match_at(src, cur, end)? {
            0 => break,
            len => cur += len,
        }
    }
    Some(cur - from + acc)
}

/// Match `pattern` as many times as possible.
///
/// Stops on the first mismatch or zero-length match, so patterns that can
/// match nothing still terminate.
pub(crate) fn match_many<S: CharSource + ?Sized>(
    pattern: &Pattern,
    src: &S,
    from: usize,
    end: usize,
    acc: usize,
) -> usize {
    let mut cur = from;
    loop {
        match pattern.match_at(src, cur, end) {
            Some(len) if len > 0 => cur += len,
            _ => return cur - from + acc,
        }
    }
}

/// Like [`match_many`] but gives up after `max` repetitions.
pub(crate) fn match_some<S: CharSource + ?Sized>(
    max: usize,
    pattern: &Pattern,
    src: &S,
    from: usize,
    end: usize,
    acc: usize,
) -> usize {
    let mut cur = from;
    for _ in 0..max {
        match pattern.match_at(src, cur, end) {
            Some(len) if len > 0 => cur += len,
            _ => break,
        }
    }
    cur - from + acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::CharPredicate;
    use crate::patterns::{always, is_char, string};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn repeat_needs_every_attempt() {
        let digit = is_char(CharPredicate::Digit);
        let src = chars("12a");
        assert_eq!(match_repeat(2, &digit, &src, 0, 3, 0), Some(2));
        assert_eq!(match_repeat(3, &digit, &src, 0, 3, 0), None);
        assert_eq!(match_repeat(0, &digit, &src, 0, 3, 5), Some(5));
    }

    #[test]
    fn repeat_of_zero_length_match_returns_at_once() {
        let maybe_x = string("x").optional();
        let src = chars("yyy");
        assert_eq!(match_repeat(usize::MAX, &maybe_x, &src, 0, 3, 0), Some(0));
        assert_eq!(match_repeat(usize::MAX, &always(), &src, 1, 3, 4), Some(4));
        let src = chars("xxy");
        assert_eq!(match_repeat(usize::MAX, &maybe_x, &src, 0, 3, 0), Some(2));
    }

    #[test]
    fn many_accumulates_onto_acc() {
        let digit = is_char(CharPredicate::Digit);
        let src = chars("x123y");
        assert_eq!(match_many(&digit, &src, 1, 5, 1), 4);
    }

    #[test]
    fn many_stops_on_zero_length_match() {
        let src = chars("abc");
        assert_eq!(match_many(&always(), &src, 0, 3, 0), 0);
        let maybe_x = string("x").optional();
        assert_eq!(match_many(&maybe_x, &src, 0, 3, 0), 0);
    }

    #[test]
    fn some_is_capped() {
        let ab = string("ab");
        let src = chars("abababab");
        assert_eq!(match_some(2, &ab, &src, 0, 8, 0), 4);
        assert_eq!(match_some(10, &ab, &src, 0, 8, 0), 8);
        assert_eq!(match_some(0, &ab, &src, 0, 8, 0), 0);
    }

    #[test]
    fn loops_respect_the_window_end() {
        let digit = is_char(CharPredicate::Digit);
        let src = chars("123456");
        assert_eq!(match_many(&digit, &src, 0, 4, 0), 4);
        assert_eq!(match_repeat(5, &digit, &src, 0, 4, 0), None);
    }
}
